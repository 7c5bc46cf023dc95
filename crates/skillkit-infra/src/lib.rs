//! Infrastructure layer for SkillKit.
//!
//! Implements the ports defined in `skillkit-core`: local filesystem access
//! and SHA-256 hashing. Also loads `config.toml` and resolves the home
//! directory.

pub mod config;
pub mod filesystem;
pub mod hash;
