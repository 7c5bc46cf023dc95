//! SKILL.md / SKILL.yaml manifest parsing and validation.
//!
//! A SKILL.md file is YAML frontmatter delimited by `---` followed by a
//! markdown body with the skill's instructions. SKILL.yaml carries the same
//! fields as a bare YAML document.

use std::path::Path;

use skillkit_types::error::ManifestError;
use skillkit_types::skill::{SKILL_MD, SKILL_YAML, SkillManifest};

use crate::storage::fs::SkillFileSystem;

/// Longest accepted skill name.
pub const MAX_NAME_LEN: usize = 64;

/// Extract YAML frontmatter and markdown body from a SKILL.md file.
///
/// Content must start with `---`, and a closing `\n---` separates the YAML
/// from the body. Returns `(yaml_str, body_str)` with leading newlines
/// trimmed from the body.
pub fn extract_frontmatter(content: &str) -> Result<(&str, &str), ManifestError> {
    // Editors on Windows like to prepend a BOM.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(after_open) = content.strip_prefix("---") else {
        return Err(ManifestError::MissingFrontmatter);
    };
    let after_open = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))
        .unwrap_or(after_open);

    // Empty frontmatter: the closing delimiter is the very next line.
    let (yaml_str, remainder) = if let Some(rest) = after_open.strip_prefix("---") {
        ("", rest)
    } else {
        let closing_pos = after_open
            .find("\n---")
            .ok_or(ManifestError::UnterminatedFrontmatter)?;
        (&after_open[..closing_pos], &after_open[closing_pos + 4..])
    };

    let body_str = remainder
        .strip_prefix("\r\n")
        .or_else(|| remainder.strip_prefix('\n'))
        .unwrap_or(remainder)
        .trim_start_matches(['\r', '\n']);

    Ok((yaml_str, body_str))
}

/// Parse a SKILL.md file into a `SkillManifest` and markdown body.
pub fn parse_skill_md(content: &str) -> Result<(SkillManifest, String), ManifestError> {
    let (yaml_str, body_str) = extract_frontmatter(content)?;
    let manifest = parse_yaml(yaml_str)?;
    Ok((manifest, body_str.to_owned()))
}

/// Parse a SKILL.yaml document.
pub fn parse_skill_yaml(content: &str) -> Result<SkillManifest, ManifestError> {
    parse_yaml(content)
}

fn parse_yaml(yaml: &str) -> Result<SkillManifest, ManifestError> {
    if yaml.trim().is_empty() {
        return Ok(SkillManifest::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| ManifestError::InvalidYaml(e.to_string()))
}

/// Read the manifest of the skill in `dir`.
///
/// Prefers SKILL.md and falls back to SKILL.yaml. Unreadable or malformed
/// manifests are logged and yield `None`; callers treat the skill as having
/// no metadata.
pub fn load_manifest<F: SkillFileSystem + ?Sized>(fs: &F, dir: &Path) -> Option<SkillManifest> {
    let md_path = dir.join(SKILL_MD);
    if fs.is_file(&md_path) {
        let parsed = fs
            .read_to_string(&md_path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                parse_skill_md(&content)
                    .map(|(manifest, _)| manifest)
                    .map_err(|e| e.to_string())
            });
        match parsed {
            Ok(manifest) => return Some(manifest),
            Err(error) => {
                tracing::warn!(path = %md_path.display(), %error, "Ignoring unparseable SKILL.md");
            }
        }
    }

    let yaml_path = dir.join(SKILL_YAML);
    if fs.is_file(&yaml_path) {
        let parsed = fs
            .read_to_string(&yaml_path)
            .map_err(|e| e.to_string())
            .and_then(|content| parse_skill_yaml(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(manifest) => return Some(manifest),
            Err(error) => {
                tracing::warn!(path = %yaml_path.display(), %error, "Ignoring unparseable SKILL.yaml");
            }
        }
    }

    None
}

/// Check that `name` is a well-formed skill slug.
///
/// Lowercase ASCII letters, digits and hyphens only, no leading or trailing
/// hyphen, at most [`MAX_NAME_LEN`] characters.
pub fn validate_skill_name(name: &str) -> Result<(), ManifestError> {
    let invalid = |reason: &str| ManifestError::InvalidName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("must be at most 64 characters"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid("must contain only lowercase letters, digits, and hyphens"));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("must not start or end with a hyphen"));
    }
    Ok(())
}

/// Validate a parsed manifest.
///
/// A declared name must be a valid slug and a declared version must parse as
/// semver. Absent fields are fine.
pub fn validate_manifest(manifest: &SkillManifest) -> Result<(), ManifestError> {
    if let Some(ref name) = manifest.name {
        validate_skill_name(name)?;
    }
    if let Some(ref version) = manifest.version {
        parse_version(version)?;
    }
    Ok(())
}

/// Parse a manifest version string as semver.
pub fn parse_version(version: &str) -> Result<semver::Version, ManifestError> {
    version
        .trim()
        .parse::<semver::Version>()
        .map_err(|_| ManifestError::InvalidVersion(version.to_owned()))
}
