//! Handlers for the `/versions` resource.
//!
//! Versions are nested under artifacts:
//! `/artifacts/{artifact_id}/versions[/{id}]`
//!
//! All mutations go through [`VersionLifecycle`]; the handlers only resolve
//! the actor, the quota, and the response shape.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use apidock_core::error::CoreError;
use apidock_core::types::DbId;
use apidock_db::comparison::VersionComparison;
use apidock_db::models::version::{ArtifactVersion, CreateDraft, PublishVersion, VersionDetail};
use apidock_db::repositories::{ArtifactRepo, SnapshotRepo, VersionRepo};
use apidock_db::versioning::VersionLifecycle;

use crate::error::{AppError, AppResult};
use crate::middleware::actor::ActorId;
use crate::state::AppState;

/// GET /api/v1/artifacts/{artifact_id}/versions
///
/// List all versions of an artifact, newest revision first.
pub async fn list(
    State(state): State<AppState>,
    Path(artifact_id): Path<DbId>,
) -> AppResult<Json<Vec<ArtifactVersion>>> {
    ensure_artifact_exists(&state, artifact_id).await?;
    let versions = VersionRepo::list_by_artifact(&state.pool, artifact_id).await?;
    Ok(Json(versions))
}

/// GET /api/v1/artifacts/{artifact_id}/versions/{id}
///
/// Version row joined with its full snapshot.
pub async fn get_detail(
    State(state): State<AppState>,
    Path((artifact_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<VersionDetail>> {
    let version = VersionRepo::find_for_artifact(&state.pool, artifact_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id,
        }))?;
    let snapshot = SnapshotRepo::find_by_version_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Internal(format!("Version {id} has no snapshot")))
        })?;
    Ok(Json(VersionDetail { version, snapshot }))
}

/// POST /api/v1/artifacts/{artifact_id}/versions
///
/// Create a new DRAFT version. The body is a patch over the current live
/// snapshot; absent fields are inherited.
pub async fn create(
    State(state): State<AppState>,
    Path(artifact_id): Path<DbId>,
    actor: ActorId,
    Json(input): Json<CreateDraft>,
) -> AppResult<(StatusCode, Json<ArtifactVersion>)> {
    let max_revisions = state.quota.max_revisions(artifact_id).await?;
    let version =
        VersionLifecycle::create_draft(&state.pool, artifact_id, actor.0, &input, max_revisions)
            .await?;
    Ok((StatusCode::CREATED, Json(version)))
}

/// PUT /api/v1/artifacts/{artifact_id}/versions/{id}/publish
///
/// Promote a version to LIVE under the given label. The previous live
/// version (if any) is archived in the same transaction.
pub async fn publish(
    State(state): State<AppState>,
    Path((artifact_id, id)): Path<(DbId, DbId)>,
    actor: ActorId,
    Json(input): Json<PublishVersion>,
) -> AppResult<Json<ArtifactVersion>> {
    let version =
        VersionLifecycle::publish(&state.pool, artifact_id, id, actor.0, &input).await?;
    Ok(Json(version))
}

/// PUT /api/v1/artifacts/{artifact_id}/versions/{id}/archive
///
/// Retire a version. Idempotent; archiving the live version leaves the
/// artifact with no live version.
pub async fn archive(
    State(state): State<AppState>,
    Path((artifact_id, id)): Path<(DbId, DbId)>,
    actor: ActorId,
) -> AppResult<Json<ArtifactVersion>> {
    let version = VersionLifecycle::archive(&state.pool, artifact_id, id, actor.0).await?;
    Ok(Json(version))
}

/// POST /api/v1/artifacts/{artifact_id}/versions/{id}/rollback
///
/// Create a new DRAFT from a historical version's snapshot. The draft must
/// still be published to take effect.
pub async fn rollback(
    State(state): State<AppState>,
    Path((artifact_id, id)): Path<(DbId, DbId)>,
    actor: ActorId,
) -> AppResult<(StatusCode, Json<ArtifactVersion>)> {
    let max_revisions = state.quota.max_revisions(artifact_id).await?;
    let version =
        VersionLifecycle::rollback(&state.pool, artifact_id, id, actor.0, max_revisions).await?;
    Ok((StatusCode::CREATED, Json(version)))
}

/// Query parameters for version comparison.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub from: DbId,
    pub to: DbId,
}

/// Response payload for version comparison.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub from_version_id: DbId,
    pub to_version_id: DbId,
    pub diff: Value,
    pub cache_hit: bool,
}

/// GET /api/v1/artifacts/{artifact_id}/versions/compare?from={id}&to={id}
///
/// Structural diff between two snapshots of the same artifact, served from
/// the comparison cache when present.
pub async fn compare(
    State(state): State<AppState>,
    Path(artifact_id): Path<DbId>,
    Query(query): Query<CompareQuery>,
) -> AppResult<Json<CompareResponse>> {
    let result =
        VersionComparison::compare(&state.pool, artifact_id, query.from, query.to).await?;
    Ok(Json(CompareResponse {
        from_version_id: query.from,
        to_version_id: query.to,
        diff: result.diff,
        cache_hit: result.cache_hit,
    }))
}

async fn ensure_artifact_exists(state: &AppState, artifact_id: DbId) -> AppResult<()> {
    ArtifactRepo::find_by_id(&state.pool, artifact_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artifact",
            id: artifact_id,
        }))?;
    Ok(())
}
