//! Data access and the version control engine.
//!
//! Layout mirrors the rest of the platform's services:
//! - `models`: `FromRow` row structs and request DTOs, one module per table.
//! - `repositories`: zero-sized structs with async query methods.
//! - `versioning`: the lifecycle state machine -- the only code that writes
//!   version rows, one transaction per operation.
//! - `retention`: post-commit history reclamation.
//! - `comparison`: the cached snapshot diff engine.

use sqlx::postgres::PgPoolOptions;

use apidock_core::error::CoreError;

pub mod comparison;
pub mod models;
pub mod repositories;
pub mod retention;
pub mod versioning;

pub type DbPool = sqlx::PgPool;

/// Error type for engine operations: domain outcomes or storage faults.
///
/// `Core` variants are caller-visible, expected outcomes (not found, label
/// conflict, invalid transition). `Sqlx` covers everything the store throws,
/// including transient serialization failures the caller may retry from
/// scratch -- never partially resumed, since every mutation is one
/// transaction.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
