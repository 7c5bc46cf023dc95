//! Skill storage resolution and package management logic for SkillKit.
//!
//! This crate defines the ports (`SkillFileSystem`, `ContentHasher`) that the
//! infrastructure layer implements. It depends only on `skillkit-types` and
//! never on `skillkit-infra` or any concrete I/O crate.

pub mod service;
pub mod skill;
pub mod storage;
