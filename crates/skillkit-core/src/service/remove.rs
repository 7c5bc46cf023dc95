//! Removal of installed skills by name.

use std::collections::BTreeMap;

use skillkit_types::skill::RemoveReport;
use skillkit_types::storage::SkillLocation;

use crate::storage::fs::SkillFileSystem;
use crate::storage::resolver::StorageResolver;

/// Remove each named skill from the location it resolves to.
///
/// Names are matched against the listing first; a name with no valid
/// installation falls back to a plain lookup so broken installs can still be
/// cleaned up. Only the winning copy is removed, which may reveal a shadowed
/// copy in a lower-priority location. Failures are recorded per name.
pub fn remove_skills<F: SkillFileSystem>(
    resolver: &StorageResolver<F>,
    names: &[String],
) -> RemoveReport {
    let listed: BTreeMap<String, SkillLocation> = resolver
        .list_all_skills()
        .into_iter()
        .map(|skill| (skill.name.clone(), skill))
        .collect();

    let mut report = RemoveReport::default();
    let mut seen = Vec::new();
    for name in names {
        if seen.contains(name) {
            continue;
        }
        seen.push(name.clone());

        let Some(skill) = listed
            .get(name)
            .cloned()
            .or_else(|| resolver.find_skill(name))
        else {
            report.not_found.push(name.clone());
            continue;
        };

        match resolver.remove_skill(&skill) {
            Ok(()) => report.removed.push(skill),
            Err(e) => {
                tracing::warn!(skill = %name, error = %e, "Failed to remove skill");
                report.failed.push((name.clone(), e.to_string()));
            }
        }
    }

    report
}
