//! Skill installation service.
//!
//! Copies discovered skills into the storage location selected by an
//! [`InstallScope`] and records an install receipt beside each copy.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use skillkit_types::skill::{
    DiscoveredSkill, InstallOutcome, InstallReceipt, InstallReport, RECEIPT_FILE,
    SkillInstallResult, SkipReason,
};
use skillkit_types::storage::{InstallScope, SkillLocation, StorageLocation};

use crate::service::hash::{ContentHasher, tree_digest};
use crate::skill::manifest::parse_version;
use crate::storage::fs::{SkillFileSystem, copy_dir_all};
use crate::storage::resolver::{StorageResolver, is_plain_name};

/// Installs skills through a resolver's filesystem.
pub struct InstallService<'a, F: SkillFileSystem, H: ContentHasher> {
    resolver: &'a StorageResolver<F>,
    hasher: H,
}

impl<'a, F: SkillFileSystem, H: ContentHasher> InstallService<'a, F, H> {
    /// Create a service installing through `resolver`, digesting with `hasher`.
    pub fn new(resolver: &'a StorageResolver<F>, hasher: H) -> Self {
        Self { resolver, hasher }
    }

    /// Install `skills` into the location selected by `scope`.
    ///
    /// Only failing to create the target location aborts the run. Per-skill
    /// problems are recorded in the report and the remaining skills are
    /// still installed. A name repeated within `skills` is installed once,
    /// from its first occurrence.
    pub fn install(
        &self,
        skills: &[DiscoveredSkill],
        scope: InstallScope,
        force: bool,
        source_label: &str,
    ) -> anyhow::Result<InstallReport> {
        let target = self.resolver.install_location(scope);
        self.resolver
            .ensure_location(&target)
            .context("Failed to prepare install location")?;
        // Refresh so the report reflects the directory we just created.
        let target = self.resolver.install_location(scope);

        let mut seen = HashSet::new();
        let results = skills
            .iter()
            .map(|skill| {
                let outcome = if seen.insert(skill.name.as_str()) {
                    self.install_one(skill, &target, force, source_label)
                } else {
                    tracing::warn!(
                        skill = %skill.name,
                        path = %skill.path.display(),
                        "Skipping repeated skill name in install batch"
                    );
                    InstallOutcome::Skipped {
                        reason: SkipReason::DuplicateName,
                    }
                };
                SkillInstallResult {
                    name: skill.name.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(InstallReport { target, results })
    }

    fn install_one(
        &self,
        skill: &DiscoveredSkill,
        target: &StorageLocation,
        force: bool,
        source_label: &str,
    ) -> InstallOutcome {
        let fs = self.resolver.fs();

        if !is_plain_name(&skill.name) {
            return InstallOutcome::Failed {
                reason: format!("invalid skill name '{}'", skill.name),
            };
        }
        if !self.resolver.has_entry_file(&skill.path) {
            tracing::warn!(
                skill = %skill.name,
                entry_files = ?self.resolver.entry_files(),
                "Skipping skill without an implementation entry file"
            );
            return InstallOutcome::Skipped {
                reason: SkipReason::MissingEntryFile,
            };
        }

        let checksum = match self.digest(&skill.path) {
            Ok(checksum) => checksum,
            Err(e) => {
                return InstallOutcome::Failed {
                    reason: format!("failed to read source {}: {e}", skill.path.display()),
                };
            }
        };

        let dest = target.skill_path(&skill.name);
        let mut replaced = false;
        if self.resolver.skill_exists(&skill.name, target) {
            if fs.is_dir(&dest) && self.digest(&dest).is_ok_and(|d| d == checksum) {
                tracing::debug!(skill = %skill.name, "Identical skill already installed");
                return InstallOutcome::Skipped {
                    reason: SkipReason::IdenticalContent,
                };
            }
            if !force {
                return InstallOutcome::Skipped {
                    reason: SkipReason::AlreadyExists,
                };
            }
            if let Err(e) = self
                .resolver
                .remove_skill(&SkillLocation::new(&skill.name, target))
            {
                return InstallOutcome::Failed {
                    reason: e.to_string(),
                };
            }
            replaced = true;
        }

        if let Err(e) = copy_dir_all(fs, &skill.path, &dest) {
            // Leave no half-copied skill behind.
            if let Err(cleanup) = fs.remove_dir_all(&dest) {
                tracing::warn!(path = %dest.display(), error = %cleanup, "Failed to clean up partial install");
            }
            return InstallOutcome::Failed {
                reason: format!("failed to copy skill files: {e}"),
            };
        }

        let receipt = InstallReceipt {
            source: source_label.to_owned(),
            installed_at: Utc::now(),
            version: skill.version.as_deref().and_then(|v| parse_version(v).ok()),
            checksum,
        };
        if let Err(e) = write_receipt(fs, &dest, &receipt) {
            if let Err(cleanup) = fs.remove_dir_all(&dest) {
                tracing::warn!(path = %dest.display(), error = %cleanup, "Failed to clean up install without receipt");
            }
            return InstallOutcome::Failed {
                reason: format!("failed to write install receipt: {e:#}"),
            };
        }

        tracing::info!(skill = %skill.name, path = %dest.display(), replaced, "Installed skill");
        InstallOutcome::Installed {
            path: dest,
            replaced,
        }
    }

    fn digest(&self, dir: &Path) -> std::io::Result<String> {
        tree_digest(self.resolver.fs(), &self.hasher, dir, &[RECEIPT_FILE])
    }
}

fn write_receipt<F: SkillFileSystem + ?Sized>(
    fs: &F,
    skill_dir: &Path,
    receipt: &InstallReceipt,
) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(receipt).context("Failed to serialize install receipt")?;
    fs.write_file(&skill_dir.join(RECEIPT_FILE), &content)
        .context("Failed to write install receipt")
}

/// Read the install receipt of an installed skill, if it has one.
pub fn read_receipt<F: SkillFileSystem + ?Sized>(fs: &F, skill_dir: &Path) -> Option<InstallReceipt> {
    let path = skill_dir.join(RECEIPT_FILE);
    if !fs.is_file(&path) {
        return None;
    }
    let parsed = fs
        .read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(receipt) => Some(receipt),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "Ignoring unreadable install receipt");
            None
        }
    }
}
