use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every caller-visible failure of the engine maps onto one of these
/// variants; the API layer translates them into HTTP statuses (404, 400,
/// 409, 401, 500 respectively). Internal faults carry an opaque message and
/// are never partially recovered from -- every mutating operation is a
/// single transaction.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
