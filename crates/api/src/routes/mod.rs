pub mod artifact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /artifacts                                      create (POST), list (GET)
/// /artifacts/{id}                                 get
/// /artifacts/{artifact_id}/versions              list, create draft
/// /artifacts/{artifact_id}/versions/compare      structural diff (?from=&to=)
/// /artifacts/{artifact_id}/versions/{id}         detail with snapshot
/// /artifacts/{artifact_id}/versions/{id}/publish publish (PUT)
/// /artifacts/{artifact_id}/versions/{id}/archive archive (PUT)
/// /artifacts/{artifact_id}/versions/{id}/rollback rollback (POST)
/// /artifacts/{artifact_id}/operations            operation log (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/artifacts", artifact::router())
}
