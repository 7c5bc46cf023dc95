//! Shared domain types for SkillKit.
//!
//! This crate contains the core domain types used across the SkillKit
//! workspace: storage locations, resolved skill references, skill manifests,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, semver, thiserror.

pub mod config;
pub mod error;
pub mod skill;
pub mod storage;
