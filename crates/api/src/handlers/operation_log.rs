//! Handlers for the operation log read endpoint.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use apidock_core::error::CoreError;
use apidock_core::types::DbId;
use apidock_db::models::operation_log::OperationLog;
use apidock_db::repositories::{ArtifactRepo, OperationLogRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Default and maximum page sizes for log listing.
const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Query parameters for listing operation-log entries.
#[derive(Debug, Deserialize)]
pub struct ListLogQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/artifacts/{artifact_id}/operations
///
/// Paginated operation history, newest first. Entries survive retention:
/// a swept version leaves its log rows behind with the version reference
/// nulled out.
pub async fn list_by_artifact(
    State(state): State<AppState>,
    Path(artifact_id): Path<DbId>,
    Query(query): Query<ListLogQuery>,
) -> AppResult<Json<Vec<OperationLog>>> {
    ArtifactRepo::find_by_id(&state.pool, artifact_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artifact",
            id: artifact_id,
        }))?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let entries =
        OperationLogRepo::list_by_artifact(&state.pool, artifact_id, limit, offset).await?;
    Ok(Json(entries))
}
