//! History reclamation.
//!
//! Runs after every version-creating commit. The sweep is not part of that
//! transaction: a missed sweep only delays cleanup, so best-effort after
//! commit is sufficient and simpler.

use sqlx::PgPool;

use apidock_core::types::DbId;

use crate::repositories::VersionRepo;

/// Deletes the oldest archived versions once history exceeds the limit.
pub struct RetentionSweeper;

impl RetentionSweeper {
    /// Trim an artifact's history to `max_revisions` versions.
    ///
    /// Only ARCHIVED versions are candidates, oldest revision first; DRAFT
    /// and LIVE rows are never deleted regardless of age. When non-archived
    /// rows alone exceed the limit, the sweep deletes what it can and leaves
    /// the rest -- the limit is advisory, not hard-enforced. Snapshot and
    /// cached-comparison rows cascade with each deleted version.
    ///
    /// Returns the number of versions deleted. A non-positive limit disables
    /// sweeping.
    pub async fn sweep(
        pool: &PgPool,
        artifact_id: DbId,
        max_revisions: i64,
    ) -> Result<u64, sqlx::Error> {
        if max_revisions <= 0 {
            return Ok(0);
        }

        let total = VersionRepo::count_for_artifact(pool, artifact_id).await?;
        let excess = total - max_revisions;
        if excess <= 0 {
            return Ok(0);
        }

        let result = sqlx::query(
            "DELETE FROM artifact_versions
             WHERE id IN (
                 SELECT id FROM artifact_versions
                 WHERE artifact_id = $1 AND status = 'archived'
                 ORDER BY revision ASC
                 LIMIT $2
             )",
        )
        .bind(artifact_id)
        .bind(excess)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Run [`Self::sweep`] and only log the outcome.
    pub async fn sweep_best_effort(pool: &PgPool, artifact_id: DbId, max_revisions: i64) {
        match Self::sweep(pool, artifact_id, max_revisions).await {
            Ok(0) => {}
            Ok(deleted) => {
                tracing::debug!(artifact_id, deleted, "Retention sweep reclaimed versions");
            }
            Err(error) => {
                tracing::warn!(artifact_id, %error, "Retention sweep failed; will retry after the next write");
            }
        }
    }
}
