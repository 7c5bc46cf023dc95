use std::path::PathBuf;

use thiserror::Error;

/// Errors from mutating skill storage (creating locations, removing skills).
///
/// Absence is never an error; these only surface when the filesystem rejects
/// a write or delete.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create storage location {}: {source}", path.display())]
    CreateLocation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove skill directory {}: {source}", path.display())]
    RemoveSkill {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid skill name: '{0}'")]
    InvalidName(String),
}

/// Errors from parsing SKILL.md / SKILL.yaml metadata.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("SKILL.md must start with YAML frontmatter delimiter '---'")]
    MissingFrontmatter,

    #[error("SKILL.md missing closing frontmatter delimiter '---'")]
    UnterminatedFrontmatter,

    #[error("invalid skill metadata: {0}")]
    InvalidYaml(String),

    #[error("invalid skill version '{0}'")]
    InvalidVersion(String),

    #[error("invalid skill name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

/// Errors from reading an install source directory.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read source directory {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_names_path() {
        let err = StorageError::RemoveSkill {
            path: PathBuf::from("/tmp/skills/pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/skills/pdf"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_manifest_error_display() {
        let err = ManifestError::InvalidVersion("one.two".to_string());
        assert_eq!(err.to_string(), "invalid skill version 'one.two'");
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::NotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "source directory not found: /nope");
    }
}
