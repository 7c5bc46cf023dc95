//! Business logic services (use cases).
//!
//! Services orchestrate the resolver, filesystem operations, and install
//! rules. They depend on traits (ports), never on concrete infrastructure.

pub mod hash;
pub mod install;
pub mod remove;
pub mod sync;
