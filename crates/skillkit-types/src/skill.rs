//! Skill domain types.
//!
//! Manifests parsed from `SKILL.md` / `SKILL.yaml`, skills discovered in an
//! install source, install receipts, and the reports produced by the install,
//! remove and sync operations.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{SkillLocation, StorageKind, StorageLocation};

/// Markdown manifest file name.
pub const SKILL_MD: &str = "SKILL.md";

/// YAML manifest file name.
pub const SKILL_YAML: &str = "SKILL.yaml";

/// Receipt written next to an installed skill's files.
pub const RECEIPT_FILE: &str = ".skillkit-meta.toml";

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Skill metadata from SKILL.md frontmatter or SKILL.yaml.
///
/// Every field is optional; the directory name stands in for a missing name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default, rename = "allowed-tools")]
    pub allowed_tools: Option<String>,
}

impl SkillManifest {
    /// The description, or `"No description"` when missing or blank.
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description")
    }
}

// ---------------------------------------------------------------------------
// Discovered (not yet installed) skills
// ---------------------------------------------------------------------------

/// Files bundled alongside a skill's manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResources {
    pub scripts: Vec<String>,
    pub references: Vec<String>,
    pub assets: Vec<String>,
}

/// A skill found in an install source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredSkill {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    pub has_skill_md: bool,
    pub has_skill_yaml: bool,
    /// Whether an implementation entry file is present.
    pub has_implementation: bool,
    pub path: PathBuf,
    pub resources: SkillResources,
}

/// Contents of `.skillkit-meta.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    /// Where the skill was installed from.
    pub source: String,
    pub installed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<semver::Version>,
    /// Tree digest of the installed files, receipt excluded.
    pub checksum: String,
}

// ---------------------------------------------------------------------------
// Install / remove reports
// ---------------------------------------------------------------------------

/// Why a selected skill was not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The target already holds a different skill of that name and
    /// overwrite was not forced.
    AlreadyExists,
    /// The target already holds byte-identical content.
    IdenticalContent,
    /// The source has no implementation entry file, so the installed copy
    /// would be invisible to listing.
    MissingEntryFile,
    /// An earlier skill in the same run already used this name.
    DuplicateName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "already exists (use --force to overwrite)"),
            Self::IdenticalContent => write!(f, "identical content already installed"),
            Self::MissingEntryFile => write!(f, "missing implementation entry file"),
            Self::DuplicateName => write!(f, "another skill in this install has the same name"),
        }
    }
}

/// Outcome for one skill in an install run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    Installed { path: PathBuf, replaced: bool },
    Skipped { reason: SkipReason },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInstallResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: InstallOutcome,
}

/// Result of installing a batch of skills into one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    pub target: StorageLocation,
    pub results: Vec<SkillInstallResult>,
}

impl InstallReport {
    /// Results that copied a skill into the target.
    pub fn installed(&self) -> impl Iterator<Item = &SkillInstallResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, InstallOutcome::Installed { .. }))
    }

    /// Results skipped without touching the target.
    pub fn skipped(&self) -> impl Iterator<Item = &SkillInstallResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, InstallOutcome::Skipped { .. }))
    }

    /// Results that hit an error.
    pub fn failed(&self) -> impl Iterator<Item = &SkillInstallResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, InstallOutcome::Failed { .. }))
    }
}

/// Result of removing skills by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveReport {
    pub removed: Vec<SkillLocation>,
    pub not_found: Vec<String>,
    /// `(name, error message)` pairs.
    pub failed: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

/// One skill line in the generated AGENTS.md block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub name: String,
    pub description: String,
    pub kind: StorageKind,
}
