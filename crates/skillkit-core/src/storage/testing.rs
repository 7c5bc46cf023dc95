//! In-memory `SkillFileSystem` for unit tests.
//!
//! Supports injecting read, write and remove failures so best-effort code paths can
//! be exercised without touching real permissions.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::fs::{DirEntryInfo, SkillFileSystem};

#[derive(Default)]
struct State {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    unreadable: BTreeSet<PathBuf>,
    unwritable: BTreeSet<PathBuf>,
    unremovable: BTreeSet<PathBuf>,
    reverse_listing: bool,
}

#[derive(Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        let mut state = self.state.lock().unwrap();
        state.files.insert(path.to_path_buf(), content.as_bytes().to_vec());
    }

    /// Make `read_dir` on `path` fail with `PermissionDenied`.
    pub fn deny_read(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.unreadable.insert(path.as_ref().to_path_buf());
    }

    /// Make `write_file` on `path` fail with `PermissionDenied`.
    pub fn deny_write(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.unwritable.insert(path.as_ref().to_path_buf());
    }

    /// Make `remove_dir_all` on `path` fail with `PermissionDenied`.
    pub fn deny_remove(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.unremovable.insert(path.as_ref().to_path_buf());
    }

    /// List directory children in reverse name order.
    pub fn reverse_listing(&self) {
        self.state.lock().unwrap().reverse_listing = true;
    }
}

fn denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl SkillFileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.state.lock().unwrap().files.contains_key(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let state = self.state.lock().unwrap();
        if state.unreadable.contains(path) {
            return Err(denied(path));
        }
        if !state.dirs.contains(path) {
            return Err(not_found(path));
        }
        let child_name = |child: &Path| -> Option<String> {
            (child.parent() == Some(path) && child != path)
                .then(|| child.file_name().map(|n| n.to_string_lossy().into_owned()))
                .flatten()
        };
        let mut entries: Vec<DirEntryInfo> = state
            .dirs
            .iter()
            .filter_map(|d| child_name(d).map(|name| DirEntryInfo { name, is_dir: true }))
            .chain(
                state
                    .files
                    .keys()
                    .filter_map(|f| child_name(f).map(|name| DirEntryInfo { name, is_dir: false })),
            )
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        if state.reverse_listing {
            entries.reverse();
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.state.lock().unwrap().unwritable.contains(path) {
            return Err(denied(path));
        }
        self.add_file(path, content);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.is_file(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists: {}", path.display()),
            ));
        }
        self.add_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.unremovable.contains(path) {
            return Err(denied(path));
        }
        if !state.dirs.contains(path) {
            return Err(not_found(path));
        }
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        let bytes = self.read(from)?;
        if let Some(parent) = to.parent() {
            self.add_dir(parent);
        }
        self.state.lock().unwrap().files.insert(to.to_path_buf(), bytes);
        Ok(())
    }
}
