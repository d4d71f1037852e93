//! Artifact entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use apidock_core::types::{DbId, Timestamp};

/// A row from the `artifacts` table.
///
/// `live_version_id` is a weak reference to the version currently considered
/// authoritative; `name`/`method`/`path` are denormalized copies of the live
/// snapshot's display fields, resynced on publish.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artifact {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub method: Option<String>,
    pub path: Option<String>,
    pub live_version_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtifact {
    pub project_id: DbId,
    pub name: String,
    pub method: Option<String>,
    pub path: Option<String>,
}
