//! Pure domain logic for the version control & snapshot engine.
//!
//! This crate has no I/O dependencies. It defines the domain vocabulary
//! (statuses, change kinds, operation kinds), the immutable snapshot payload
//! and its copy-on-write merge, the structural diff, and the error taxonomy
//! shared by the repository and API layers.

pub mod audit;
pub mod change_kind;
pub mod diff;
pub mod error;
pub mod example;
pub mod quota;
pub mod snapshot;
pub mod status;
pub mod types;
