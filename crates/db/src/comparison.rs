//! The diff engine: structural comparison of two versions with a
//! persistent cache keyed by the ordered version pair.

use serde_json::Value;
use sqlx::PgPool;

use apidock_core::diff::compute_diff;
use apidock_core::error::CoreError;
use apidock_core::types::DbId;

use crate::repositories::{ComparisonCacheRepo, SnapshotRepo, VersionRepo};
use crate::DbError;

/// Outcome of a comparison. `cache_hit` is observable so callers (and the
/// determinism tests) can tell a cached read from a fresh computation.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub diff: Value,
    pub cache_hit: bool,
}

/// Compares snapshots of two versions of the same artifact.
pub struct VersionComparison;

impl VersionComparison {
    /// Compare `from` against `to`, consulting the cache first.
    ///
    /// Directionality matters: `(A, B)` and `(B, A)` are distinct cache
    /// entries with swapped sides. Snapshots are immutable, so a cached
    /// entry is valid forever and no invalidation exists. On a concurrent
    /// first comparison of the same pair, the losing writer keeps its own
    /// (identical) computation and the winner's row stays.
    pub async fn compare(
        pool: &PgPool,
        artifact_id: DbId,
        from_version_id: DbId,
        to_version_id: DbId,
    ) -> Result<ComparisonResult, DbError> {
        if from_version_id == to_version_id {
            return Err(
                CoreError::Validation("Cannot compare a version to itself".into()).into(),
            );
        }

        // Both versions must exist and belong to the artifact being queried.
        for id in [from_version_id, to_version_id] {
            VersionRepo::find_for_artifact(pool, artifact_id, id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Version",
                    id,
                })?;
        }

        if let Some(entry) =
            ComparisonCacheRepo::find_pair(pool, from_version_id, to_version_id).await?
        {
            return Ok(ComparisonResult {
                diff: entry.diff,
                cache_hit: true,
            });
        }

        let from = load_payload(pool, from_version_id).await?;
        let to = load_payload(pool, to_version_id).await?;
        let diff = serde_json::to_value(compute_diff(&from, &to))
            .map_err(|e| CoreError::Internal(format!("Failed to serialize diff: {e}")))?;

        ComparisonCacheRepo::insert_if_absent(pool, from_version_id, to_version_id, &diff).await?;

        Ok(ComparisonResult {
            diff,
            cache_hit: false,
        })
    }
}

async fn load_payload(
    pool: &PgPool,
    version_id: DbId,
) -> Result<apidock_core::snapshot::SnapshotPayload, DbError> {
    Ok(SnapshotRepo::find_by_version_id(pool, version_id)
        .await?
        .ok_or_else(|| CoreError::Internal(format!("Version {version_id} has no snapshot")))?
        .into_payload())
}
