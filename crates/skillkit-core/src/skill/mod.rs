//! Skill metadata and source handling.
//!
//! SKILL.md / SKILL.yaml parsing and validation, discovery of installable
//! skills in a source directory, and the AGENTS.md skills block.

pub mod agents_md;
pub mod discovery;
pub mod manifest;
