//! The version lifecycle state machine.
//!
//! [`VersionLifecycle`] is the only entry point that writes version rows.
//! Every operation is one transaction that starts by taking a per-artifact
//! advisory lock, so the read-then-write windows (revision allocation, the
//! live-pointer swap) are serialized between concurrent callers. The lock is
//! transaction-scoped and releases at commit or rollback.
//!
//! The retention sweep runs after commit, best-effort: a missed sweep only
//! delays cleanup and never violates a correctness invariant.

use serde_json::json;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use apidock_core::audit::OperationKind;
use apidock_core::change_kind::ChangeKind;
use apidock_core::diff::compute_diff;
use apidock_core::error::CoreError;
use apidock_core::example;
use apidock_core::snapshot::SnapshotPayload;
use apidock_core::status::VersionStatus;
use apidock_core::types::DbId;

use crate::models::operation_log::RecordOperation;
use crate::models::snapshot::VersionSnapshot;
use crate::models::version::{ArtifactVersion, CreateDraft, PublishVersion};
use crate::repositories::{ArtifactRepo, NewVersion, OperationLogRepo, SnapshotRepo, VersionRepo};
use crate::retention::RetentionSweeper;
use crate::DbError;

/// The version lifecycle manager: create, publish, archive, rollback.
pub struct VersionLifecycle;

impl VersionLifecycle {
    /// Create a new DRAFT version of an artifact.
    ///
    /// The snapshot is built copy-on-write: fields supplied in `input` win,
    /// anything else is copied from the current live snapshot, and the
    /// remainder falls back to empty defaults -- a draft is always a full
    /// record. Missing parameter examples are generated from their schemas.
    ///
    /// `max_revisions` comes from the quota collaborator; the engine does
    /// not re-derive it.
    pub async fn create_draft(
        pool: &PgPool,
        artifact_id: DbId,
        actor_id: DbId,
        input: &CreateDraft,
        max_revisions: i64,
    ) -> Result<ArtifactVersion, DbError> {
        let mut tx = pool.begin().await?;
        lock_artifact(&mut tx, artifact_id).await?;

        let artifact = ArtifactRepo::find_by_id(&mut *tx, artifact_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Artifact",
                id: artifact_id,
            })?;

        // Base for copy-on-write: the live snapshot, if one exists.
        let base = match artifact.live_version_id {
            Some(live_id) => SnapshotRepo::find_by_version_id(&mut *tx, live_id)
                .await?
                .map(VersionSnapshot::into_payload),
            None => None,
        };

        let mut payload = SnapshotPayload::merged(base.as_ref(), &input.patch)?;
        example::fill_parameter_examples(&mut payload.header_params);
        example::fill_parameter_examples(&mut payload.query_params);
        example::fill_parameter_examples(&mut payload.path_params);

        let (operation, change_kinds) = match &base {
            None => (OperationKind::Create, vec![ChangeKind::Create]),
            Some(base) => {
                let diff = compute_diff(base, &payload);
                let kinds = ChangeKind::from_changed_fields(diff.keys().map(String::as_str));
                (OperationKind::Update, kinds)
            }
        };

        let revision = VersionRepo::next_revision(&mut *tx, artifact_id).await?;
        let version = VersionRepo::insert(
            &mut *tx,
            &NewVersion {
                artifact_id,
                revision,
                status: VersionStatus::Draft,
                change_kinds: &change_kinds,
                summary: input.summary.as_deref(),
                changelog: input.changelog.as_deref(),
                created_by: actor_id,
            },
        )
        .await?;
        SnapshotRepo::insert(&mut *tx, version.id, &payload).await?;

        OperationLogRepo::record(
            &mut *tx,
            &RecordOperation {
                artifact_id,
                version_id: Some(version.id),
                actor_id,
                operation,
                change_kinds,
                description: Some(format!("Created draft revision {revision}")),
                metadata: None,
            },
        )
        .await?;

        tx.commit().await?;

        RetentionSweeper::sweep_best_effort(pool, artifact_id, max_revisions).await;
        Ok(version)
    }

    /// Promote a version to LIVE under the given label.
    ///
    /// Atomically archives the previous live version (if different), stamps
    /// the target with the label and publish time, and resyncs the
    /// artifact's live pointer and display fields. Re-publishing a version
    /// with its own label is idempotent; using a label owned by a different
    /// version of the same artifact is a conflict.
    pub async fn publish(
        pool: &PgPool,
        artifact_id: DbId,
        version_id: DbId,
        actor_id: DbId,
        input: &PublishVersion,
    ) -> Result<ArtifactVersion, DbError> {
        let label = input.label.trim();
        if label.is_empty() {
            return Err(CoreError::Validation("A publish label is required".into()).into());
        }

        let mut tx = pool.begin().await?;
        lock_artifact(&mut tx, artifact_id).await?;

        ensure_artifact_exists(&mut *tx, artifact_id).await?;
        let target = find_version(&mut *tx, artifact_id, version_id).await?;

        if VersionRepo::label_taken_by_other(&mut *tx, artifact_id, label, version_id).await? {
            return Err(CoreError::Conflict(format!(
                "Label '{label}' is already used by another version of this artifact"
            ))
            .into());
        }

        let previous_live = VersionRepo::find_live_for_artifact(&mut *tx, artifact_id).await?;
        if let Some(prev) = &previous_live {
            if prev.id != version_id {
                VersionRepo::set_archived(&mut *tx, prev.id).await?;
            }
        }

        let published = VersionRepo::set_live(
            &mut *tx,
            version_id,
            label,
            input.summary.as_deref(),
            input.changelog.as_deref(),
        )
        .await?;

        let snapshot = SnapshotRepo::find_by_version_id(&mut *tx, version_id)
            .await?
            .ok_or_else(|| {
                CoreError::Internal(format!("Version {version_id} has no snapshot"))
            })?;
        ArtifactRepo::sync_live(
            &mut *tx,
            artifact_id,
            version_id,
            &snapshot.name,
            snapshot.method.as_deref(),
            snapshot.path.as_deref(),
        )
        .await?;

        OperationLogRepo::record(
            &mut *tx,
            &RecordOperation {
                artifact_id,
                version_id: Some(version_id),
                actor_id,
                operation: OperationKind::Publish,
                change_kinds: target.change_kind_set()?,
                description: Some(format!(
                    "Published revision {} as '{label}'",
                    target.revision
                )),
                metadata: Some(json!({
                    "label": label,
                    "previous_live_version_id": previous_live.as_ref().map(|v| v.id),
                })),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(published)
    }

    /// Archive a version. Idempotent: archiving an already-archived version
    /// succeeds without effect. Archiving the live version clears the
    /// artifact's live pointer; nothing is promoted in its place.
    pub async fn archive(
        pool: &PgPool,
        artifact_id: DbId,
        version_id: DbId,
        actor_id: DbId,
    ) -> Result<ArtifactVersion, DbError> {
        let mut tx = pool.begin().await?;
        lock_artifact(&mut tx, artifact_id).await?;

        ensure_artifact_exists(&mut *tx, artifact_id).await?;
        let target = find_version(&mut *tx, artifact_id, version_id).await?;

        let status = target.status()?;
        if status == VersionStatus::Archived {
            tx.commit().await?;
            return Ok(target);
        }

        let was_live = status == VersionStatus::Live;
        let archived = VersionRepo::set_archived(&mut *tx, version_id).await?;
        if was_live {
            ArtifactRepo::clear_live(&mut *tx, artifact_id, version_id).await?;
        }

        OperationLogRepo::record(
            &mut *tx,
            &RecordOperation {
                artifact_id,
                version_id: Some(version_id),
                actor_id,
                operation: OperationKind::Archive,
                change_kinds: Vec::new(),
                description: Some(format!("Archived revision {}", target.revision)),
                metadata: Some(json!({ "was_live": was_live })),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(archived)
    }

    /// Create a new DRAFT whose snapshot is a verbatim copy of a historical
    /// version's snapshot.
    ///
    /// The target must have been live at some point: rolling back to a DRAFT
    /// is rejected. The old version row is never re-activated and the live
    /// pointer is untouched -- the new draft goes through [`Self::publish`]
    /// to take effect, giving the operator a review step.
    pub async fn rollback(
        pool: &PgPool,
        artifact_id: DbId,
        version_id: DbId,
        actor_id: DbId,
        max_revisions: i64,
    ) -> Result<ArtifactVersion, DbError> {
        let mut tx = pool.begin().await?;
        lock_artifact(&mut tx, artifact_id).await?;

        ensure_artifact_exists(&mut *tx, artifact_id).await?;
        let target = find_version(&mut *tx, artifact_id, version_id).await?;

        if target.status()? == VersionStatus::Draft {
            return Err(CoreError::Validation(format!(
                "Cannot roll back to revision {}: it is a draft and was never live",
                target.revision
            ))
            .into());
        }

        let snapshot = SnapshotRepo::find_by_version_id(&mut *tx, version_id)
            .await?
            .ok_or_else(|| {
                CoreError::Internal(format!("Version {version_id} has no snapshot"))
            })?;
        let payload = snapshot.into_payload();

        let previous_live = VersionRepo::find_live_for_artifact(&mut *tx, artifact_id).await?;
        let change_kinds = vec![ChangeKind::Restore];

        let revision = VersionRepo::next_revision(&mut *tx, artifact_id).await?;
        let version = VersionRepo::insert(
            &mut *tx,
            &NewVersion {
                artifact_id,
                revision,
                status: VersionStatus::Draft,
                change_kinds: &change_kinds,
                summary: Some(&format!("Restored from revision {}", target.revision)),
                changelog: None,
                created_by: actor_id,
            },
        )
        .await?;
        SnapshotRepo::insert(&mut *tx, version.id, &payload).await?;

        OperationLogRepo::record(
            &mut *tx,
            &RecordOperation {
                artifact_id,
                version_id: Some(version.id),
                actor_id,
                operation: OperationKind::Rollback,
                change_kinds,
                description: Some(format!(
                    "Rolled back to revision {} as new draft revision {revision}",
                    target.revision
                )),
                metadata: Some(json!({
                    "source_version_id": version_id,
                    "previous_live_version_id": previous_live.as_ref().map(|v| v.id),
                })),
            },
        )
        .await?;

        tx.commit().await?;

        RetentionSweeper::sweep_best_effort(pool, artifact_id, max_revisions).await;
        Ok(version)
    }
}

/// Take the transaction-scoped advisory lock for one artifact.
///
/// Serializes all lifecycle operations on the artifact without blocking
/// operations on other artifacts. Released automatically at commit/rollback.
async fn lock_artifact(
    tx: &mut Transaction<'_, Postgres>,
    artifact_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(artifact_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn ensure_artifact_exists(
    conn: &mut PgConnection,
    artifact_id: DbId,
) -> Result<(), DbError> {
    ArtifactRepo::find_by_id(&mut *conn, artifact_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Artifact",
            id: artifact_id,
        })?;
    Ok(())
}

async fn find_version(
    conn: &mut PgConnection,
    artifact_id: DbId,
    version_id: DbId,
) -> Result<ArtifactVersion, DbError> {
    Ok(
        VersionRepo::find_for_artifact(&mut *conn, artifact_id, version_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Version",
                id: version_id,
            })?,
    )
}
