//! ContentHasher trait for computing integrity hashes.
//!
//! Defined in skillkit-core so the installer can compare skill trees without
//! coupling to a specific hashing algorithm. The `Sha256ContentHasher` adapter
//! lives in skillkit-infra.

use std::io;
use std::path::Path;

use crate::storage::fs::{SkillFileSystem, list_files};

/// Abstraction over content hashing for integrity verification.
pub trait ContentHasher: Send + Sync {
    /// Compute a hex-encoded hash of the given content.
    fn compute_hash(&self, content: &[u8]) -> String;
}

/// Digest of every file under `root`, skipping any file named in `exclude`
/// at the top level.
///
/// Each file contributes a `relative/path:hash` line; lines are sorted by
/// path and hashed together, so the digest is independent of directory
/// listing order.
pub fn tree_digest<F, H>(fs: &F, hasher: &H, root: &Path, exclude: &[&str]) -> io::Result<String>
where
    F: SkillFileSystem + ?Sized,
    H: ContentHasher + ?Sized,
{
    let mut manifest = String::new();
    for relative in list_files(fs, root)? {
        if exclude.iter().any(|name| relative == Path::new(name)) {
            continue;
        }
        let content = fs.read(&root.join(&relative))?;
        // Forward slashes keep digests stable across platforms.
        let key = relative.to_string_lossy().replace('\\', "/");
        manifest.push_str(&key);
        manifest.push(':');
        manifest.push_str(&hasher.compute_hash(&content));
        manifest.push('\n');
    }
    Ok(hasher.compute_hash(manifest.as_bytes()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::testing::MemoryFileSystem;

    /// FNV-1a, good enough to tell test fixtures apart.
    pub(crate) struct FnvHasher;

    impl ContentHasher for FnvHasher {
        fn compute_hash(&self, content: &[u8]) -> String {
            let hash = content.iter().fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
                (acc ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
            });
            format!("{hash:016x}")
        }
    }

    #[test]
    fn digest_ignores_listing_order() {
        let a = MemoryFileSystem::new();
        let b = MemoryFileSystem::new();
        b.reverse_listing();
        for fs in [&a, &b] {
            fs.add_file("/s/SKILL.md", "meta");
            fs.add_file("/s/index.js", "code");
            fs.add_file("/s/scripts/run.sh", "run");
        }

        let da = tree_digest(&a, &FnvHasher, Path::new("/s"), &[]).unwrap();
        let db = tree_digest(&b, &FnvHasher, Path::new("/s"), &[]).unwrap();
        assert_eq!(da, db);
    }

    #[test]
    fn digest_changes_with_content() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/s/index.js", "v1");
        let before = tree_digest(&fs, &FnvHasher, Path::new("/s"), &[]).unwrap();
        fs.add_file("/s/index.js", "v2");
        let after = tree_digest(&fs, &FnvHasher, Path::new("/s"), &[]).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn digest_skips_excluded_files() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/s/index.js", "code");
        let plain = tree_digest(&fs, &FnvHasher, Path::new("/s"), &[".receipt"]).unwrap();
        fs.add_file("/s/.receipt", "installed_at = now");
        let with_receipt = tree_digest(&fs, &FnvHasher, Path::new("/s"), &[".receipt"]).unwrap();
        assert_eq!(plain, with_receipt);
    }
}
