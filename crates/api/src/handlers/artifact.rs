//! Handlers for the `/artifacts` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use apidock_core::error::CoreError;
use apidock_core::types::DbId;
use apidock_db::models::artifact::{Artifact, CreateArtifact};
use apidock_db::repositories::ArtifactRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/artifacts
///
/// Register a new artifact. It starts with no versions and no live pointer;
/// content arrives with the first draft.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateArtifact>,
) -> AppResult<(StatusCode, Json<Artifact>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Artifact name must not be empty".into(),
        )));
    }

    let artifact = ArtifactRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(artifact)))
}

/// Query parameters for listing artifacts.
#[derive(Debug, Deserialize)]
pub struct ListArtifactsQuery {
    pub project_id: DbId,
}

/// GET /api/v1/artifacts?project_id={id}
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListArtifactsQuery>,
) -> AppResult<Json<Vec<Artifact>>> {
    let artifacts = ArtifactRepo::list_by_project(&state.pool, query.project_id).await?;
    Ok(Json(artifacts))
}

/// GET /api/v1/artifacts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Artifact>> {
    let artifact = ArtifactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artifact",
            id,
        }))?;
    Ok(Json(artifact))
}
