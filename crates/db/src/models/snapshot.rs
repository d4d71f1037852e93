//! Snapshot entity model.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use apidock_core::snapshot::SnapshotPayload;
use apidock_core::types::{DbId, Timestamp};

/// A row from the `version_snapshots` table.
///
/// Immutable after creation -- there is deliberately no update DTO for this
/// table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionSnapshot {
    pub version_id: DbId,
    pub name: String,
    pub method: Option<String>,
    pub path: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub header_params: Value,
    pub query_params: Value,
    pub path_params: Value,
    pub request_body: Value,
    pub responses: Value,
    pub mock_config: Value,
    pub created_at: Timestamp,
}

impl VersionSnapshot {
    /// Convert the row into the domain payload used by merge and diff.
    pub fn into_payload(self) -> SnapshotPayload {
        SnapshotPayload {
            name: self.name,
            method: self.method,
            path: self.path,
            description: self.description,
            tags: self.tags,
            header_params: self.header_params,
            query_params: self.query_params,
            path_params: self.path_params,
            request_body: self.request_body,
            responses: self.responses,
            mock_config: self.mock_config,
        }
    }
}
