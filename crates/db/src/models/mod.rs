//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs for the operations that touch the table

pub mod artifact;
pub mod comparison;
pub mod operation_log;
pub mod snapshot;
pub mod version;
