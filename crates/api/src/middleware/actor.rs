//! Actor identity extractor for Axum handlers.
//!
//! Authentication happens upstream: the trusted gateway injects the
//! resolved identity as an `x-actor-id` header. The extractor only reads
//! it back; requests without the header are rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use apidock_core::error::CoreError;
use apidock_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The acting user's id, taken from the `x-actor-id` header.
///
/// Use this as an extractor parameter in any handler that records who
/// performed an operation:
///
/// ```ignore
/// async fn my_handler(actor: ActorId) -> AppResult<Json<()>> {
///     tracing::info!(actor_id = actor.0, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ActorId(pub DbId);

impl FromRequestParts<AppState> for ActorId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-actor-id header".into()))
            })?;

        let actor_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid x-actor-id header. Expected a numeric user id".into(),
            ))
        })?;

        Ok(ActorId(actor_id))
    }
}
