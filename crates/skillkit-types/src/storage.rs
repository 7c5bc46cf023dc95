//! Storage location types.
//!
//! Skills live in one of four fixed roots. The roots differ along two axes:
//! project vs. global (home directory), and universal (`.agent`) vs. the
//! default `.claude` namespace. Lower priority numbers shadow higher ones.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Location table
// ---------------------------------------------------------------------------

/// The kind of a storage location. Closed set, never extended at runtime.
///
/// Discriminants match the row index in [`LOCATION_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageKind {
    ProjectUniversal = 0,
    GlobalUniversal = 1,
    Project = 2,
    Global = 3,
}

/// Which directory a location is rooted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootScope {
    /// The project root supplied at construction.
    Project,
    /// The user's home directory.
    Home,
}

/// One row of the canonical location table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationDescriptor {
    pub kind: StorageKind,
    pub scope: RootScope,
    /// Namespace directory directly under the root (`.agent` or `.claude`).
    pub namespace: &'static str,
    /// 1 = highest priority.
    pub priority: u8,
}

/// Directory under the namespace that holds skill directories.
pub const SKILLS_DIR: &str = "skills";

/// The four canonical storage locations, in priority order.
///
/// Both the location enumerator and the install-target selector read from
/// this table; nothing else hardcodes a priority.
pub const LOCATION_TABLE: [LocationDescriptor; 4] = [
    LocationDescriptor {
        kind: StorageKind::ProjectUniversal,
        scope: RootScope::Project,
        namespace: ".agent",
        priority: 1,
    },
    LocationDescriptor {
        kind: StorageKind::GlobalUniversal,
        scope: RootScope::Home,
        namespace: ".agent",
        priority: 2,
    },
    LocationDescriptor {
        kind: StorageKind::Project,
        scope: RootScope::Project,
        namespace: ".claude",
        priority: 3,
    },
    LocationDescriptor {
        kind: StorageKind::Global,
        scope: RootScope::Home,
        namespace: ".claude",
        priority: 4,
    },
];

impl StorageKind {
    /// Table row for this kind.
    pub const fn descriptor(self) -> LocationDescriptor {
        LOCATION_TABLE[self as usize]
    }

    /// Lookup priority, 1 being the highest.
    pub const fn priority(self) -> u8 {
        self.descriptor().priority
    }

    /// Whether this location lives under the home directory.
    pub const fn is_global(self) -> bool {
        matches!(self.descriptor().scope, RootScope::Home)
    }

    /// Whether this location is an `.agent/skills` directory.
    pub const fn is_universal(self) -> bool {
        matches!(self, Self::ProjectUniversal | Self::GlobalUniversal)
    }

    /// Map an install scope onto the location kind it targets.
    pub const fn for_scope(scope: InstallScope) -> Self {
        match (scope.global, scope.universal) {
            (true, true) => Self::GlobalUniversal,
            (true, false) => Self::Global,
            (false, true) => Self::ProjectUniversal,
            (false, false) => Self::Project,
        }
    }

    /// Human-readable label, e.g. `.claude (project)`.
    pub fn label(self) -> String {
        let where_ = if self.is_global() { "global" } else { "project" };
        format!("{} ({where_})", self.descriptor().namespace)
    }

    /// Resolve the base directory for this kind under the given roots.
    pub fn base_dir(self, roots: &StorageRoots) -> PathBuf {
        let descriptor = self.descriptor();
        let root = match descriptor.scope {
            RootScope::Project => &roots.project_root,
            RootScope::Home => &roots.home_dir,
        };
        root.join(descriptor.namespace).join(SKILLS_DIR)
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectUniversal => write!(f, "project-universal"),
            Self::GlobalUniversal => write!(f, "global-universal"),
            Self::Project => write!(f, "project"),
            Self::Global => write!(f, "global"),
        }
    }
}

// ---------------------------------------------------------------------------
// Roots and scopes
// ---------------------------------------------------------------------------

/// The two directories every location is resolved against.
///
/// Supplied once when a resolver is built; resolution never reads the
/// process working directory or environment on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    pub project_root: PathBuf,
    pub home_dir: PathBuf,
}

impl StorageRoots {
    /// Create roots from a project directory and a home directory.
    pub fn new(project_root: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            home_dir: home_dir.into(),
        }
    }
}

/// Install target options. Both default to false, which selects the
/// project `.claude` location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallScope {
    /// Install under the home directory instead of the project root.
    #[serde(default)]
    pub global: bool,
    /// Use the `.agent` namespace instead of `.claude`.
    #[serde(default)]
    pub universal: bool,
}

// ---------------------------------------------------------------------------
// Locations and resolved skills
// ---------------------------------------------------------------------------

/// A storage root annotated with its live existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub base: PathBuf,
    pub kind: StorageKind,
    pub priority: u8,
    /// Observed when the location was built; not refreshed afterwards.
    pub exists: bool,
}

impl StorageLocation {
    /// Path a skill named `name` would occupy in this location.
    pub fn skill_path(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }
}

/// A skill bound to the location it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLocation {
    pub name: String,
    pub path: PathBuf,
    pub kind: StorageKind,
    pub priority: u8,
}

impl SkillLocation {
    /// The skill `name` inside `location`.
    pub fn new(name: &str, location: &StorageLocation) -> Self {
        Self {
            name: name.to_owned(),
            path: location.skill_path(name),
            kind: location.kind,
            priority: location.priority,
        }
    }

    /// Directory holding the skill.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Scan results
// ---------------------------------------------------------------------------

/// What happened when one location was scanned during a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The location directory does not exist.
    Absent,
    /// The location was read.
    Scanned {
        /// Valid skills in directory order (not deduplicated).
        skills: Vec<SkillLocation>,
        /// Subdirectories that failed the validity predicate.
        rejected: Vec<String>,
    },
    /// The location exists but could not be read.
    Skipped { reason: String },
}

/// Per-location result of a listing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationScan {
    pub location: StorageLocation,
    pub outcome: ScanOutcome,
}

impl LocationScan {
    /// Valid skills found, empty unless the location was scanned.
    pub fn skills(&self) -> &[SkillLocation] {
        match &self.outcome {
            ScanOutcome::Scanned { skills, .. } => skills,
            ScanOutcome::Absent | ScanOutcome::Skipped { .. } => &[],
        }
    }

    /// Why the location was skipped, if it was.
    pub fn skip_reason(&self) -> Option<&str> {
        match &self.outcome {
            ScanOutcome::Skipped { reason } => Some(reason),
            _ => None,
        }
    }
}
