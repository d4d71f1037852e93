//! Repository for the `version_snapshots` table.
//!
//! Insert and read only. Snapshots are immutable; deletion happens via the
//! cascade from `artifact_versions`.

use sqlx::PgExecutor;

use apidock_core::snapshot::SnapshotPayload;
use apidock_core::types::DbId;

use crate::models::snapshot::VersionSnapshot;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "version_id, name, method, path, description, tags, \
    header_params, query_params, path_params, request_body, responses, mock_config, created_at";

/// Provides create and read operations for version snapshots.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Persist the full payload for a freshly inserted version.
    pub async fn insert<'e, E>(
        executor: E,
        version_id: DbId,
        payload: &SnapshotPayload,
    ) -> Result<VersionSnapshot, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO version_snapshots
                (version_id, name, method, path, description, tags,
                 header_params, query_params, path_params, request_body, responses, mock_config)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(version_id)
            .bind(&payload.name)
            .bind(&payload.method)
            .bind(&payload.path)
            .bind(&payload.description)
            .bind(&payload.tags)
            .bind(&payload.header_params)
            .bind(&payload.query_params)
            .bind(&payload.path_params)
            .bind(&payload.request_body)
            .bind(&payload.responses)
            .bind(&payload.mock_config)
            .fetch_one(executor)
            .await
    }

    /// Find the snapshot owned by a version.
    pub async fn find_by_version_id<'e, E>(
        executor: E,
        version_id: DbId,
    ) -> Result<Option<VersionSnapshot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM version_snapshots WHERE version_id = $1");
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(version_id)
            .fetch_optional(executor)
            .await
    }
}
