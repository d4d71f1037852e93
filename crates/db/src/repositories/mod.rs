//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Reads take `&PgPool`; writes that must share the lifecycle manager's
//! transaction are generic over `PgExecutor` so the open transaction can be
//! passed in.

pub mod artifact_repo;
pub mod comparison_cache_repo;
pub mod operation_log_repo;
pub mod snapshot_repo;
pub mod version_repo;

pub use artifact_repo::ArtifactRepo;
pub use comparison_cache_repo::ComparisonCacheRepo;
pub use operation_log_repo::OperationLogRepo;
pub use snapshot_repo::SnapshotRepo;
pub use version_repo::{NewVersion, VersionRepo};
