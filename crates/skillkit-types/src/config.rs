//! Configuration types for SkillKit.
//!
//! `SkillkitConfig` represents `config.toml`, read from
//! `~/.skillkit/config.toml` and optionally overlaid by
//! `<project>/.skillkit/config.toml`.

use serde::{Deserialize, Serialize};

use crate::storage::InstallScope;

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillkitConfig {
    /// File names accepted as a skill's implementation entry point.
    #[serde(default = "default_entry_files")]
    pub entry_files: Vec<String>,

    /// Install scope used when no `--global` / `--universal` flag is given.
    #[serde(default)]
    pub install: InstallScope,

    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_entry_files() -> Vec<String> {
    vec!["index.js".to_owned()]
}

impl Default for SkillkitConfig {
    fn default() -> Self {
        Self {
            entry_files: default_entry_files(),
            install: InstallScope::default(),
            sync: SyncConfig::default(),
        }
    }
}

/// Settings for `tsk sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Manifest file, relative to the project root.
    #[serde(default = "default_sync_output")]
    pub output: String,
}

fn default_sync_output() -> String {
    "AGENTS.md".to_owned()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output: default_sync_output(),
        }
    }
}
