//! Repository for the `artifact_versions` table.

use sqlx::{PgExecutor, PgPool};

use apidock_core::change_kind::ChangeKind;
use apidock_core::status::VersionStatus;
use apidock_core::types::DbId;

use crate::models::version::ArtifactVersion;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artifact_id, revision, label, status, change_kinds, \
    summary, changelog, created_by, published_at, created_at";

/// Input for inserting a version row. Built only by the lifecycle manager.
#[derive(Debug)]
pub struct NewVersion<'a> {
    pub artifact_id: DbId,
    pub revision: i32,
    pub status: VersionStatus,
    pub change_kinds: &'a [ChangeKind],
    pub summary: Option<&'a str>,
    pub changelog: Option<&'a str>,
    pub created_by: DbId,
}

/// Provides query and transition operations for versions.
///
/// Status transitions and inserts are only reachable through
/// `versioning::VersionLifecycle`, which owns the transaction and the
/// per-artifact lock.
pub struct VersionRepo;

impl VersionRepo {
    /// Next revision for an artifact: `max(existing) + 1`, or 1 if none.
    ///
    /// Must run inside the same transaction (and advisory lock scope) as the
    /// subsequent insert -- two concurrent callers outside that scope could
    /// read the same maximum.
    pub async fn next_revision<'e, E>(executor: E, artifact_id: DbId) -> Result<i32, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(revision), 0) + 1 FROM artifact_versions WHERE artifact_id = $1",
        )
        .bind(artifact_id)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Insert a new version row.
    pub async fn insert<'e, E>(
        executor: E,
        input: &NewVersion<'_>,
    ) -> Result<ArtifactVersion, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO artifact_versions
                (artifact_id, revision, status, change_kinds, summary, changelog, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(input.artifact_id)
            .bind(input.revision)
            .bind(input.status.as_str())
            .bind(ChangeKind::set_to_strings(input.change_kinds))
            .bind(input.summary)
            .bind(input.changelog)
            .bind(input.created_by)
            .fetch_one(executor)
            .await
    }

    /// Find a version by its internal ID.
    pub async fn find_by_id<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<ArtifactVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM artifact_versions WHERE id = $1");
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a version by ID, restricted to one artifact.
    pub async fn find_for_artifact<'e, E>(
        executor: E,
        artifact_id: DbId,
        id: DbId,
    ) -> Result<Option<ArtifactVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM artifact_versions WHERE id = $1 AND artifact_id = $2");
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(id)
            .bind(artifact_id)
            .fetch_optional(executor)
            .await
    }

    /// Find the artifact's current live version, if any.
    pub async fn find_live_for_artifact<'e, E>(
        executor: E,
        artifact_id: DbId,
    ) -> Result<Option<ArtifactVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM artifact_versions WHERE artifact_id = $1 AND status = 'live'"
        );
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(artifact_id)
            .fetch_optional(executor)
            .await
    }

    /// List all versions for an artifact, newest revision first.
    pub async fn list_by_artifact(
        pool: &PgPool,
        artifact_id: DbId,
    ) -> Result<Vec<ArtifactVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artifact_versions
             WHERE artifact_id = $1
             ORDER BY revision DESC"
        );
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(artifact_id)
            .fetch_all(pool)
            .await
    }

    /// Count all versions of an artifact, regardless of status.
    pub async fn count_for_artifact<'e, E>(
        executor: E,
        artifact_id: DbId,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM artifact_versions WHERE artifact_id = $1",
        )
        .bind(artifact_id)
        .fetch_one(executor)
        .await
    }

    /// Whether `label` is used by a version of this artifact other than
    /// `exclude_version_id`. The exclusion makes re-publishing a version with
    /// its own label idempotent.
    pub async fn label_taken_by_other<'e, E>(
        executor: E,
        artifact_id: DbId,
        label: &str,
        exclude_version_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM artifact_versions
                 WHERE artifact_id = $1 AND label = $2 AND id <> $3
             )",
        )
        .bind(artifact_id)
        .bind(label)
        .bind(exclude_version_id)
        .fetch_one(executor)
        .await
    }

    /// Transition a version to LIVE, stamping the label and publish time.
    /// Summary/changelog are refreshed only when supplied.
    pub async fn set_live<'e, E>(
        executor: E,
        id: DbId,
        label: &str,
        summary: Option<&str>,
        changelog: Option<&str>,
    ) -> Result<ArtifactVersion, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE artifact_versions
             SET status = 'live', label = $2, published_at = NOW(),
                 summary = COALESCE($3, summary), changelog = COALESCE($4, changelog)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(id)
            .bind(label)
            .bind(summary)
            .bind(changelog)
            .fetch_one(executor)
            .await
    }

    /// Transition a version to ARCHIVED.
    pub async fn set_archived<'e, E>(executor: E, id: DbId) -> Result<ArtifactVersion, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE artifact_versions SET status = 'archived' WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtifactVersion>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }
}
