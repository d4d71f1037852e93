//! Repository for the `comparison_cache` table.

use serde_json::Value;
use sqlx::PgPool;

use apidock_core::types::DbId;

use crate::models::comparison::ComparisonEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, from_version_id, to_version_id, diff, created_at";

/// Provides lookup and insert-once operations for cached diffs.
pub struct ComparisonCacheRepo;

impl ComparisonCacheRepo {
    /// Find the cached diff for an ordered version pair.
    pub async fn find_pair(
        pool: &PgPool,
        from_version_id: DbId,
        to_version_id: DbId,
    ) -> Result<Option<ComparisonEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comparison_cache
             WHERE from_version_id = $1 AND to_version_id = $2"
        );
        sqlx::query_as::<_, ComparisonEntry>(&query)
            .bind(from_version_id)
            .bind(to_version_id)
            .fetch_optional(pool)
            .await
    }

    /// Store a computed diff for an ordered pair. Returns `false` when a
    /// concurrent caller already stored one -- the computation is
    /// deterministic, so the loser's value equals the winner's.
    pub async fn insert_if_absent(
        pool: &PgPool,
        from_version_id: DbId,
        to_version_id: DbId,
        diff: &Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO comparison_cache (from_version_id, to_version_id, diff)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_comparison_cache_pair DO NOTHING",
        )
        .bind(from_version_id)
        .bind(to_version_id)
        .bind(diff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
