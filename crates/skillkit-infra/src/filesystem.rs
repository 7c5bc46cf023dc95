//! Local filesystem adapter for SkillKit.
//!
//! Implements the `SkillFileSystem` trait from `skillkit-core` over
//! `std::fs`, and resolves the home directory global locations live under.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use skillkit_core::storage::fs::{DirEntryInfo, SkillFileSystem};

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "SKILLKIT_HOME";

/// Real filesystem implementation of `SkillFileSystem`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a filesystem backed by `std::fs`.
    pub fn new() -> Self {
        Self
    }
}

impl SkillFileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // `file_type` does not follow symlinks.
            let is_dir = entry.file_type()?.is_dir();
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to).map(|_| ())
    }
}

/// Resolve the home directory global skill locations are rooted in.
///
/// Priority:
/// 1. `SKILLKIT_HOME` environment variable
/// 2. The user's home directory
/// 3. The current directory
pub fn resolve_home_dir() -> PathBuf {
    home_dir_from(std::env::var_os(HOME_ENV).map(PathBuf::from))
}

fn home_dir_from(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(home) = dirs::home_dir() {
        return home;
    }
    tracing::warn!("Could not determine home directory; using current directory");
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillkit_core::service::install::InstallService;
    use skillkit_core::skill::discovery::discover_skills;
    use skillkit_core::storage::resolver::StorageResolver;
    use skillkit_types::skill::{InstallOutcome, SkipReason};
    use skillkit_types::storage::{InstallScope, StorageKind, StorageRoots};
    use tempfile::TempDir;

    use crate::hash::Sha256ContentHasher;

    struct Sandbox {
        _tmp: TempDir,
        project: PathBuf,
        home: PathBuf,
    }

    impl Sandbox {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let project = tmp.path().join("project");
            let home = tmp.path().join("home");
            fs::create_dir_all(&project).unwrap();
            fs::create_dir_all(&home).unwrap();
            Self {
                _tmp: tmp,
                project,
                home,
            }
        }

        fn resolver(&self) -> StorageResolver<LocalFileSystem> {
            StorageResolver::new(
                StorageRoots::new(&self.project, &self.home),
                LocalFileSystem::new(),
            )
        }

        fn skill_dir(&self, kind: StorageKind, name: &str) -> PathBuf {
            kind.base_dir(&StorageRoots::new(&self.project, &self.home))
                .join(name)
        }

        fn add_valid(&self, kind: StorageKind, name: &str) {
            let dir = self.skill_dir(kind, name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("SKILL.md"), format!("---\nname: {name}\n---\n")).unwrap();
            fs::write(dir.join("index.js"), "module.exports = {};").unwrap();
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();
        let path = tmp.path().join("nested").join("deep").join("a.txt");

        fs.write_file(&path, "content").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_read_dir_reports_kinds() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("file.txt"), "x").unwrap();

        let mut entries = LocalFileSystem::new().read_dir(tmp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntryInfo {
                    name: "file.txt".to_owned(),
                    is_dir: false
                },
                DirEntryInfo {
                    name: "sub".to_owned(),
                    is_dir: true
                },
            ]
        );
    }

    #[test]
    fn test_exists_covers_files_and_dirs() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();
        let file = tmp.path().join("f");
        std::fs::write(&file, "").unwrap();

        assert!(fs.exists(tmp.path()));
        assert!(fs.exists(&file));
        assert!(!fs.exists(&tmp.path().join("missing")));
    }

    #[test]
    fn test_home_dir_override() {
        assert_eq!(
            home_dir_from(Some(PathBuf::from("/tmp/skillkit-home"))),
            PathBuf::from("/tmp/skillkit-home")
        );
        assert_ne!(home_dir_from(Some(PathBuf::new())), PathBuf::new());
    }

    #[test]
    fn test_priority_resolution_on_disk() {
        let sandbox = Sandbox::new();
        sandbox.add_valid(StorageKind::Project, "a");
        fs::create_dir_all(sandbox.skill_dir(StorageKind::Project, "b")).unwrap();
        fs::write(sandbox.skill_dir(StorageKind::Project, "b").join("index.js"), "").unwrap();
        sandbox.add_valid(StorageKind::Global, "b");
        sandbox.add_valid(StorageKind::Global, "c");

        let resolver = sandbox.resolver();
        let listed: Vec<_> = resolver
            .list_all_skills()
            .into_iter()
            .map(|s| (s.name, s.kind))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("a".to_owned(), StorageKind::Project),
                ("b".to_owned(), StorageKind::Global),
                ("c".to_owned(), StorageKind::Global),
            ]
        );

        // Presence-only lookup still finds the invalid project copy.
        assert_eq!(resolver.find_skill("b").unwrap().kind, StorageKind::Project);
    }

    #[test]
    fn test_file_at_location_path_is_skipped() {
        let sandbox = Sandbox::new();
        let base = StorageKind::Project.base_dir(&StorageRoots::new(&sandbox.project, &sandbox.home));
        fs::create_dir_all(base.parent().unwrap()).unwrap();
        fs::write(&base, "not a directory").unwrap();
        sandbox.add_valid(StorageKind::Global, "g");

        let resolver = sandbox.resolver();
        let scans = resolver.scan_locations();
        assert!(scans[2].location.exists);
        assert!(scans[2].skip_reason().is_some());

        let names: Vec<_> = resolver.list_all_skills().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["g"]);
    }

    #[test]
    fn test_install_then_remove_on_disk() {
        let sandbox = Sandbox::new();
        let source = sandbox.project.join("vendor").join("pdf");
        fs::create_dir_all(source.join("scripts")).unwrap();
        fs::write(source.join("SKILL.md"), "---\nname: pdf\ndescription: PDFs\n---\n").unwrap();
        fs::write(source.join("index.js"), "module.exports = {};").unwrap();
        fs::write(source.join("scripts").join("run.sh"), "echo").unwrap();

        let resolver = sandbox.resolver();
        let skills = discover_skills(resolver.fs(), &source, resolver.entry_files()).unwrap();
        let service = InstallService::new(&resolver, Sha256ContentHasher::new());
        let scope = InstallScope {
            global: true,
            universal: false,
        };

        let report = service.install(&skills, scope, false, "vendor/pdf").unwrap();
        assert_eq!(report.installed().count(), 1);
        let found = resolver.find_skill("pdf").unwrap();
        assert_eq!(found.kind, StorageKind::Global);
        assert!(found.path.join("scripts").join("run.sh").is_file());

        let again = service.install(&skills, scope, true, "vendor/pdf").unwrap();
        assert_eq!(
            again.results[0].outcome,
            InstallOutcome::Skipped {
                reason: SkipReason::IdenticalContent
            }
        );

        resolver.remove_skill(&found).unwrap();
        assert!(!found.path.exists());
        assert!(resolver.find_skill("pdf").is_none());
        resolver.remove_skill(&found).unwrap();
    }

    #[test]
    fn test_ensure_location_creates_parents() {
        let sandbox = Sandbox::new();
        let resolver = sandbox.resolver();
        let target = resolver.install_location(InstallScope {
            global: false,
            universal: true,
        });
        assert!(!target.exists);

        resolver.ensure_location(&target).unwrap();
        assert!(target.base.is_dir());
        assert!(resolver.storage_locations()[0].exists);
    }
}
