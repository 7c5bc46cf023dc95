//! Sync installed skills into AGENTS.md.

use std::path::Path;

use anyhow::Context;
use skillkit_types::skill::SkillSummary;

use crate::skill::agents_md::{parse_listed_skills, render_skills_block, upsert_skills_block};
use crate::skill::manifest::load_manifest;
use crate::storage::fs::SkillFileSystem;
use crate::storage::resolver::StorageResolver;

/// Summaries of every listed skill, descriptions taken from manifests.
pub fn skill_summaries<F: SkillFileSystem>(resolver: &StorageResolver<F>) -> Vec<SkillSummary> {
    resolver
        .list_all_skills()
        .into_iter()
        .map(|skill| {
            let description = load_manifest(resolver.fs(), &skill.path)
                .unwrap_or_default()
                .description_or_default()
                .to_owned();
            SkillSummary {
                name: skill.name,
                description,
                kind: skill.kind,
            }
        })
        .collect()
}

/// Skill names currently listed in the managed block of `output`.
pub fn listed_in<F: SkillFileSystem>(resolver: &StorageResolver<F>, output: &Path) -> Vec<String> {
    if !resolver.fs().is_file(output) {
        return Vec::new();
    }
    match resolver.fs().read_to_string(output) {
        Ok(content) => parse_listed_skills(&content),
        Err(e) => {
            tracing::warn!(path = %output.display(), error = %e, "Failed to read skills manifest");
            Vec::new()
        }
    }
}

/// Write the managed skills block into `output`.
///
/// With `selection` set, only those installed skills are written; unknown
/// names are logged and dropped. Returns the names that were written.
pub fn sync_agents_md<F: SkillFileSystem>(
    resolver: &StorageResolver<F>,
    output: &Path,
    selection: Option<&[String]>,
) -> anyhow::Result<Vec<String>> {
    let mut summaries = skill_summaries(resolver);
    if let Some(selected) = selection {
        for name in selected {
            if !summaries.iter().any(|s| &s.name == name) {
                tracing::warn!(skill = %name, "Selected skill is not installed; leaving it out");
            }
        }
        summaries.retain(|s| selected.contains(&s.name));
    }

    let fs = resolver.fs();
    let existing = if fs.is_file(output) {
        fs.read_to_string(output)
            .with_context(|| format!("Failed to read {}", output.display()))?
    } else {
        String::new()
    };

    let block = render_skills_block(&summaries);
    let updated = upsert_skills_block(&existing, &block);
    fs.write_file(output, &updated)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), count = summaries.len(), "Synced skills manifest");
    Ok(summaries.into_iter().map(|s| s.name).collect())
}
