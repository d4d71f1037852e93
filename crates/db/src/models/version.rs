//! Version entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use apidock_core::change_kind::ChangeKind;
use apidock_core::error::CoreError;
use apidock_core::snapshot::SnapshotPatch;
use apidock_core::status::VersionStatus;
use apidock_core::types::{DbId, Timestamp};

use crate::models::snapshot::VersionSnapshot;

/// A row from the `artifact_versions` table.
///
/// Mutated only by status transitions; the content lives in the 1:1
/// snapshot and never changes after creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtifactVersion {
    pub id: DbId,
    pub artifact_id: DbId,
    pub revision: i32,
    pub label: Option<String>,
    pub status: String,
    pub change_kinds: Vec<String>,
    pub summary: Option<String>,
    pub changelog: Option<String>,
    pub created_by: DbId,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ArtifactVersion {
    /// Parse the stored status string into the closed enum.
    pub fn status(&self) -> Result<VersionStatus, CoreError> {
        self.status.parse()
    }

    /// Parse the stored change-kind set into the closed enum.
    pub fn change_kind_set(&self) -> Result<Vec<ChangeKind>, CoreError> {
        self.change_kinds.iter().map(|s| s.parse()).collect()
    }
}

/// DTO for creating a draft version.
///
/// The snapshot fields are a patch over the artifact's current live
/// snapshot; absent fields are copied from it (or default to empty).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDraft {
    #[serde(flatten)]
    pub patch: SnapshotPatch,
    pub summary: Option<String>,
    pub changelog: Option<String>,
}

/// DTO for publishing a version. The label is required.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishVersion {
    pub label: String,
    pub summary: Option<String>,
    pub changelog: Option<String>,
}

/// A version joined with its snapshot, for detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct VersionDetail {
    #[serde(flatten)]
    pub version: ArtifactVersion,
    pub snapshot: VersionSnapshot,
}
