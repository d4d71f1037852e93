//! Route definitions for artifacts and their nested sub-resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{artifact, operation_log, version};
use crate::state::AppState;

/// Routes mounted at `/artifacts`.
pub fn router() -> Router<AppState> {
    let version_routes = Router::new()
        .route("/", get(version::list).post(version::create))
        .route("/compare", get(version::compare))
        .route("/{id}", get(version::get_detail))
        .route("/{id}/publish", put(version::publish))
        .route("/{id}/archive", put(version::archive))
        .route("/{id}/rollback", post(version::rollback));

    Router::new()
        .route("/", post(artifact::create).get(artifact::list))
        .route("/{id}", get(artifact::get_by_id))
        .nest("/{artifact_id}/versions", version_routes)
        .route(
            "/{artifact_id}/operations",
            get(operation_log::list_by_artifact),
        )
}
