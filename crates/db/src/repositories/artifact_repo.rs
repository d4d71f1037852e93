//! Repository for the `artifacts` table.

use sqlx::{PgExecutor, PgPool};

use apidock_core::types::DbId;

use crate::models::artifact::{Artifact, CreateArtifact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, method, path, live_version_id, created_at, updated_at";

/// Provides CRUD and live-pointer operations for artifacts.
pub struct ArtifactRepo;

impl ArtifactRepo {
    /// Insert a new artifact. It starts with no versions and no live pointer.
    pub async fn create(pool: &PgPool, input: &CreateArtifact) -> Result<Artifact, sqlx::Error> {
        let query = format!(
            "INSERT INTO artifacts (project_id, name, method, path)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artifact>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.method)
            .bind(&input.path)
            .fetch_one(pool)
            .await
    }

    /// Find an artifact by its internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Artifact>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM artifacts WHERE id = $1");
        sqlx::query_as::<_, Artifact>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all artifacts in a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Artifact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artifacts
             WHERE project_id = $1
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, Artifact>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Point the artifact at a new live version and resync its denormalized
    /// display fields from that version's snapshot.
    pub async fn sync_live<'e, E>(
        executor: E,
        artifact_id: DbId,
        version_id: DbId,
        name: &str,
        method: Option<&str>,
        path: Option<&str>,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "UPDATE artifacts
             SET live_version_id = $2, name = $3, method = $4, path = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(artifact_id)
        .bind(version_id)
        .bind(name)
        .bind(method)
        .bind(path)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Clear the live pointer, but only if it still references `version_id`.
    /// Returns `true` if the pointer was cleared.
    pub async fn clear_live<'e, E>(
        executor: E,
        artifact_id: DbId,
        version_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE artifacts SET live_version_id = NULL, updated_at = NOW()
             WHERE id = $1 AND live_version_id = $2",
        )
        .bind(artifact_id)
        .bind(version_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
