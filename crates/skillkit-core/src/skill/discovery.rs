//! Discovery of installable skills in a local source directory.

use std::path::Path;

use skillkit_types::error::SourceError;
use skillkit_types::skill::{DiscoveredSkill, SKILL_MD, SKILL_YAML, SkillResources};

use super::manifest::{load_manifest, validate_skill_name};
use crate::storage::fs::SkillFileSystem;
use crate::storage::resolver::compare_names;

/// Resource subdirectories bundled with a skill.
const SCRIPTS_DIR: &str = "scripts";
const REFERENCES_DIR: &str = "references";
const ASSETS_DIR: &str = "assets";

/// Find every skill under `source_dir`.
///
/// When `source_dir` itself carries a manifest it is the only skill;
/// otherwise each immediate subdirectory with a manifest is one. Results are
/// ordered by [`compare_names`]. When several directories resolve to the same
/// skill name only the first by path is kept.
pub fn discover_skills<F: SkillFileSystem + ?Sized>(
    fs: &F,
    source_dir: &Path,
    entry_files: &[String],
) -> Result<Vec<DiscoveredSkill>, SourceError> {
    if !fs.is_dir(source_dir) {
        return Err(SourceError::NotFound(source_dir.to_path_buf()));
    }

    if has_manifest(fs, source_dir) {
        let fallback = source_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "skill".to_owned());
        return Ok(vec![inspect_skill(fs, source_dir, &fallback, entry_files)]);
    }

    let entries = fs
        .read_dir(source_dir)
        .map_err(|source| SourceError::Unreadable {
            path: source_dir.to_path_buf(),
            source,
        })?;

    let mut skills: Vec<DiscoveredSkill> = entries
        .into_iter()
        .filter(|entry| entry.is_dir)
        .filter_map(|entry| {
            let dir = source_dir.join(&entry.name);
            if has_manifest(fs, &dir) {
                Some(inspect_skill(fs, &dir, &entry.name, entry_files))
            } else {
                tracing::debug!(dir = %dir.display(), "Skipping source directory without SKILL.md or SKILL.yaml");
                None
            }
        })
        .collect();

    skills.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.path.cmp(&b.path)));
    skills.dedup_by(|later, kept| {
        let duplicate = later.name == kept.name;
        if duplicate {
            tracing::warn!(
                skill = %later.name,
                kept = %kept.path.display(),
                ignored = %later.path.display(),
                "Ignoring source directory that repeats a skill name"
            );
        }
        duplicate
    });
    Ok(skills)
}

fn has_manifest<F: SkillFileSystem + ?Sized>(fs: &F, dir: &Path) -> bool {
    fs.is_file(&dir.join(SKILL_MD)) || fs.is_file(&dir.join(SKILL_YAML))
}

fn inspect_skill<F: SkillFileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    dir_name: &str,
    entry_files: &[String],
) -> DiscoveredSkill {
    let manifest = load_manifest(fs, dir).unwrap_or_default();

    let name = match manifest.name.as_deref() {
        Some(declared) if validate_skill_name(declared).is_ok() => declared.to_owned(),
        Some(declared) => {
            tracing::warn!(
                skill = %dir_name,
                declared = %declared,
                "Manifest name is not a valid skill name; using directory name"
            );
            dir_name.to_owned()
        }
        None => dir_name.to_owned(),
    };

    DiscoveredSkill {
        name,
        description: manifest.description_or_default().to_owned(),
        version: manifest.version.clone(),
        has_skill_md: fs.is_file(&dir.join(SKILL_MD)),
        has_skill_yaml: fs.is_file(&dir.join(SKILL_YAML)),
        has_implementation: entry_files.iter().any(|f| fs.is_file(&dir.join(f))),
        path: dir.to_path_buf(),
        resources: SkillResources {
            scripts: list_resource(fs, &dir.join(SCRIPTS_DIR)),
            references: list_resource(fs, &dir.join(REFERENCES_DIR)),
            assets: list_resource(fs, &dir.join(ASSETS_DIR)),
        },
    }
}

/// File names directly inside a resource directory, sorted.
fn list_resource<F: SkillFileSystem + ?Sized>(fs: &F, dir: &Path) -> Vec<String> {
    if !fs.is_dir(dir) {
        return Vec::new();
    }
    match fs.read_dir(dir) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .into_iter()
                .filter(|e| !e.is_dir)
                .map(|e| e.name)
                .collect();
            names.sort();
            names
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to list skill resources");
            Vec::new()
        }
    }
}
