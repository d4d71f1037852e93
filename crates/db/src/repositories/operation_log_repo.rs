//! Repository for the `operation_logs` table.
//!
//! `record` is generic over the executor so the lifecycle manager appends
//! within its own transaction: a rolled-back operation must never leave a
//! log entry claiming it happened, and a failed append fails the operation.

use sqlx::{PgExecutor, PgPool};

use apidock_core::change_kind::ChangeKind;
use apidock_core::types::DbId;

use crate::models::operation_log::{OperationLog, RecordOperation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artifact_id, version_id, actor_id, operation, \
    change_kinds, description, metadata, created_at";

/// Provides append and query operations for the operation log.
pub struct OperationLogRepo;

impl OperationLogRepo {
    /// Append one entry. Call with the transaction of the state change it
    /// documents.
    pub async fn record<'e, E>(
        executor: E,
        input: &RecordOperation,
    ) -> Result<OperationLog, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO operation_logs
                (artifact_id, version_id, actor_id, operation, change_kinds, description, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OperationLog>(&query)
            .bind(input.artifact_id)
            .bind(input.version_id)
            .bind(input.actor_id)
            .bind(input.operation.as_str())
            .bind(ChangeKind::set_to_strings(&input.change_kinds))
            .bind(&input.description)
            .bind(&input.metadata)
            .fetch_one(executor)
            .await
    }

    /// List entries for an artifact, newest first, with pagination.
    pub async fn list_by_artifact(
        pool: &PgPool,
        artifact_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OperationLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM operation_logs
             WHERE artifact_id = $1
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, OperationLog>(&query)
            .bind(artifact_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
