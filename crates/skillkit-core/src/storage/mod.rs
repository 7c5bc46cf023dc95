//! Skill storage: the filesystem port and the priority-ordered resolver.

pub mod fs;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use fs::{DirEntryInfo, SkillFileSystem};
pub use resolver::{StorageResolver, compare_names, is_plain_name};
