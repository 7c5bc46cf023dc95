//! Configuration loader for SkillKit.
//!
//! Reads `{home}/.skillkit/config.toml` and overlays
//! `{project}/.skillkit/config.toml` on top of it, key by key. Falls back to
//! defaults when files are missing or malformed.

use std::path::{Path, PathBuf};

use skillkit_types::config::SkillkitConfig;

/// Directory holding SkillKit's own files under a root.
pub const CONFIG_DIR: &str = ".skillkit";

/// Path of `config.toml` under `root`.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join("config.toml")
}

/// Load the effective configuration.
///
/// - Missing files contribute nothing.
/// - A file that fails to read or parse is logged and ignored.
/// - If the merged table does not fit the schema, logs a warning and
///   returns [`SkillkitConfig::default()`].
pub fn load_config(home_dir: &Path, project_root: &Path) -> SkillkitConfig {
    let mut merged = toml::Table::new();
    for path in [config_path(home_dir), config_path(project_root)] {
        if let Some(table) = read_table(&path) {
            merge_tables(&mut merged, table);
        }
    }

    match toml::Value::Table(merged).try_into::<SkillkitConfig>() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Invalid configuration: {err}, using defaults");
            SkillkitConfig::default()
        }
    }
}

fn read_table(path: &Path) -> Option<toml::Table> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}", path.display());
            return None;
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, ignoring", path.display());
            return None;
        }
    };

    match content.parse::<toml::Table>() {
        Ok(table) => Some(table),
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, ignoring", path.display());
            None
        }
    }
}

/// Recursively merge `overlay` into `base`; overlay values win.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, content: &str) {
        let path = config_path(root);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn load_config_missing_files_returns_default() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let config = load_config(home.path(), project.path());
        assert_eq!(config, SkillkitConfig::default());
    }

    #[test]
    fn load_config_reads_home_file() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(
            home.path(),
            "entry_files = [\"index.js\", \"main.py\"]\n\n[install]\nglobal = true\n",
        );

        let config = load_config(home.path(), project.path());
        assert_eq!(config.entry_files, vec!["index.js", "main.py"]);
        assert!(config.install.global);
        assert_eq!(config.sync.output, "AGENTS.md");
    }

    #[test]
    fn project_overrides_home_key_by_key() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(home.path(), "[install]\nglobal = true\nuniversal = true\n");
        write_config(project.path(), "[install]\nglobal = false\n\n[sync]\noutput = \"CLAUDE.md\"\n");

        let config = load_config(home.path(), project.path());
        assert!(!config.install.global);
        assert!(config.install.universal);
        assert_eq!(config.sync.output, "CLAUDE.md");
    }

    #[test]
    fn malformed_file_is_ignored() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(home.path(), "[install]\nuniversal = true\n");
        write_config(project.path(), "this is not { valid toml !!!");

        let config = load_config(home.path(), project.path());
        assert!(config.install.universal);
    }

    #[test]
    fn wrong_types_fall_back_to_default() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(home.path(), "entry_files = 5\n");

        let config = load_config(home.path(), project.path());
        assert_eq!(config, SkillkitConfig::default());
    }

    #[test]
    fn merge_replaces_non_table_values() {
        let mut base: toml::Table = "a = 1\n[t]\nx = 1\ny = 2\n".parse().unwrap();
        let overlay: toml::Table = "a = [1, 2]\n[t]\ny = 3\n".parse().unwrap();
        merge_tables(&mut base, overlay);
        assert_eq!(base["a"].as_array().unwrap().len(), 2);
        assert_eq!(base["t"]["x"].as_integer(), Some(1));
        assert_eq!(base["t"]["y"].as_integer(), Some(3));
    }
}
