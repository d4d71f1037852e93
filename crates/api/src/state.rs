use std::sync::Arc;

use sqlx::PgPool;

use apidock_core::quota::RevisionQuota;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Retention quota collaborator. The lifecycle engine takes the resolved
    /// limit as an argument and never re-derives it.
    pub quota: Arc<dyn RevisionQuota>,
}
