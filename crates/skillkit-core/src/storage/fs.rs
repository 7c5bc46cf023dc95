//! Filesystem trait for abstracting skill directory I/O.
//!
//! Defined in skillkit-core so the resolver and services can read and mutate
//! skill directories without depending on a specific filesystem
//! implementation. The `LocalFileSystem` adapter lives in skillkit-infra.

use std::io;
use std::path::{Path, PathBuf};

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    /// True for directories. Symlinks are not followed.
    pub is_dir: bool,
}

/// Synchronous filesystem operations used by skill storage.
pub trait SkillFileSystem: Send + Sync {
    /// Whether anything (file or directory) exists at `path`. Errors read as
    /// `false`.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// List the immediate children of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and all its contents.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy a single file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Recursively copy the tree at `from` into `to`.
pub fn copy_dir_all<F: SkillFileSystem + ?Sized>(fs: &F, from: &Path, to: &Path) -> io::Result<()> {
    fs.create_dir_all(to)?;
    for entry in fs.read_dir(from)? {
        let src = from.join(&entry.name);
        let dest = to.join(&entry.name);
        if entry.is_dir {
            copy_dir_all(fs, &src, &dest)?;
        } else {
            fs.copy_file(&src, &dest)?;
        }
    }
    Ok(())
}

/// Relative paths of every file under `root`, sorted.
pub fn list_files<F: SkillFileSystem + ?Sized>(fs: &F, root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(fs, root, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files<F: SkillFileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    relative: &Path,
    files: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in fs.read_dir(dir)? {
        let rel = relative.join(&entry.name);
        if entry.is_dir {
            collect_files(fs, &dir.join(&entry.name), &rel, files)?;
        } else {
            files.push(rel);
        }
    }
    Ok(())
}
