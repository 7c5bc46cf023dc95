//! Priority-ordered skill storage resolution.
//!
//! `StorageResolver` enumerates the four canonical storage locations, picks
//! install targets, finds and lists skills with higher-priority locations
//! shadowing lower ones, and performs the create/remove mutations on skill
//! directories. Every query reads the filesystem afresh; nothing is cached.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io;
use std::path::Path;

use skillkit_types::error::StorageError;
use skillkit_types::skill::{SKILL_MD, SKILL_YAML};
use skillkit_types::storage::{
    InstallScope, LOCATION_TABLE, LocationScan, ScanOutcome, SkillLocation, StorageKind,
    StorageLocation, StorageRoots,
};

use super::fs::SkillFileSystem;

/// Default implementation entry files.
pub const DEFAULT_ENTRY_FILES: &[&str] = &["index.js"];

/// Resolves skills across the four storage locations.
///
/// Layout:
/// ```text
/// {project_root}/.agent/skills/{name}/    priority 1
/// {home_dir}/.agent/skills/{name}/        priority 2
/// {project_root}/.claude/skills/{name}/   priority 3
/// {home_dir}/.claude/skills/{name}/       priority 4
/// ```
#[derive(Debug, Clone)]
pub struct StorageResolver<F> {
    roots: StorageRoots,
    entry_files: Vec<String>,
    fs: F,
}

impl<F: SkillFileSystem> StorageResolver<F> {
    /// Create a resolver over the given roots with the default entry files.
    pub fn new(roots: StorageRoots, fs: F) -> Self {
        Self {
            roots,
            entry_files: DEFAULT_ENTRY_FILES.iter().map(|s| (*s).to_owned()).collect(),
            fs,
        }
    }

    /// Replace the set of accepted implementation entry files.
    pub fn with_entry_files(mut self, entry_files: Vec<String>) -> Self {
        self.entry_files = entry_files;
        self
    }

    /// Project root and home directory this resolver was built with.
    pub fn roots(&self) -> &StorageRoots {
        &self.roots
    }

    /// File names accepted as an implementation entry point.
    pub fn entry_files(&self) -> &[String] {
        &self.entry_files
    }

    /// The filesystem port all reads and mutations go through.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    fn location(&self, kind: StorageKind) -> StorageLocation {
        let base = kind.base_dir(&self.roots);
        let exists = self.fs.exists(&base);
        StorageLocation {
            base,
            kind,
            priority: kind.priority(),
            exists,
        }
    }

    /// All four storage locations in priority order (1 first), each with its
    /// existence observed now.
    pub fn storage_locations(&self) -> Vec<StorageLocation> {
        LOCATION_TABLE
            .iter()
            .map(|descriptor| self.location(descriptor.kind))
            .collect()
    }

    /// The location an install with the given scope writes to.
    pub fn install_location(&self, scope: InstallScope) -> StorageLocation {
        self.location(StorageKind::for_scope(scope))
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Find the highest-priority location holding a directory named `name`.
    ///
    /// Only path presence is checked, not the validity predicate. Lower
    /// priority copies of the same name are shadowed.
    pub fn find_skill(&self, name: &str) -> Option<SkillLocation> {
        if !is_plain_name(name) {
            tracing::debug!(skill = %name, "Rejecting lookup for non-plain skill name");
            return None;
        }

        self.storage_locations()
            .into_iter()
            .filter(|location| location.exists)
            .find(|location| self.fs.exists(&location.skill_path(name)))
            .map(|location| SkillLocation::new(name, &location))
    }

    /// Scan every location, reporting per-location outcomes.
    ///
    /// A location that cannot be read is reported as skipped; the remaining
    /// locations are still scanned.
    pub fn scan_locations(&self) -> Vec<LocationScan> {
        self.storage_locations()
            .into_iter()
            .map(|location| {
                let outcome = self.scan_location(&location);
                LocationScan { location, outcome }
            })
            .collect()
    }

    fn scan_location(&self, location: &StorageLocation) -> ScanOutcome {
        if !location.exists {
            return ScanOutcome::Absent;
        }

        let entries = match self.fs.read_dir(&location.base) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    location = %location.base.display(),
                    error = %e,
                    "Skipping unreadable skill location"
                );
                return ScanOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let mut skills = Vec::new();
        let mut rejected = Vec::new();
        for entry in entries.into_iter().filter(|e| e.is_dir) {
            if self.is_skill_directory(&location.skill_path(&entry.name)) {
                skills.push(SkillLocation::new(&entry.name, location));
            } else {
                tracing::debug!(
                    skill = %entry.name,
                    location = %location.kind,
                    "Ignoring directory without manifest and entry file"
                );
                rejected.push(entry.name);
            }
        }

        ScanOutcome::Scanned { skills, rejected }
    }

    /// Every valid installed skill, one per name, ordered by
    /// [`compare_names`].
    ///
    /// When a name occurs in several locations the highest-priority valid
    /// occurrence wins. An invalid occurrence is never inserted, so a valid
    /// lower-priority copy of the same name surfaces instead.
    pub fn list_all_skills(&self) -> Vec<SkillLocation> {
        let mut by_name: HashMap<String, SkillLocation> = HashMap::new();

        for scan in self.scan_locations() {
            for skill in scan.skills() {
                by_name
                    .entry(skill.name.clone())
                    .or_insert_with(|| skill.clone());
            }
        }

        let mut skills: Vec<SkillLocation> = by_name.into_values().collect();
        skills.sort_by(|a, b| compare_names(&a.name, &b.name));
        skills
    }

    /// Whether `dir` holds a manifest (`SKILL.md` or `SKILL.yaml`) and an
    /// implementation entry file.
    pub fn is_skill_directory(&self, dir: &Path) -> bool {
        let has_manifest =
            self.fs.is_file(&dir.join(SKILL_MD)) || self.fs.is_file(&dir.join(SKILL_YAML));
        has_manifest && self.has_entry_file(dir)
    }

    /// Whether `dir` contains one of the configured entry files.
    pub fn has_entry_file(&self, dir: &Path) -> bool {
        self.entry_files
            .iter()
            .any(|entry| self.fs.is_file(&dir.join(entry)))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Create the location's base directory (and parents) if absent.
    pub fn ensure_location(&self, location: &StorageLocation) -> Result<(), StorageError> {
        if self.fs.is_dir(&location.base) {
            return Ok(());
        }

        self.fs
            .create_dir_all(&location.base)
            .map_err(|source| StorageError::CreateLocation {
                path: location.base.clone(),
                source,
            })?;
        tracing::debug!(location = %location.base.display(), "Created skill location");
        Ok(())
    }

    /// Whether a skill directory named `name` is present in `location`.
    pub fn skill_exists(&self, name: &str, location: &StorageLocation) -> bool {
        is_plain_name(name) && self.fs.exists(&location.skill_path(name))
    }

    /// Recursively delete the skill's directory. Removing an absent skill is a
    /// no-op.
    pub fn remove_skill(&self, skill: &SkillLocation) -> Result<(), StorageError> {
        if !is_plain_name(&skill.name) {
            return Err(StorageError::InvalidName(skill.name.clone()));
        }
        if !self.fs.exists(&skill.path) {
            return Ok(());
        }

        match self.fs.remove_dir_all(&skill.path) {
            Ok(()) => {
                tracing::info!(skill = %skill.name, path = %skill.path.display(), "Removed skill");
                Ok(())
            }
            // Vanished between the check and the delete.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::RemoveSkill {
                path: skill.path.clone(),
                source,
            }),
        }
    }
}

/// Human-facing name order: case-insensitive, ties broken case-sensitively.
///
/// Gives `a, alpha, b, Charlie, delta` rather than sorting every uppercase
/// name first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// A name that is exactly one normal path component.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
