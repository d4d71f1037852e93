//! Operation log entity model and DTO.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use apidock_core::audit::OperationKind;
use apidock_core::change_kind::ChangeKind;
use apidock_core::types::{DbId, Timestamp};

/// A row from the `operation_logs` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OperationLog {
    pub id: DbId,
    pub artifact_id: DbId,
    pub version_id: Option<DbId>,
    pub actor_id: DbId,
    pub operation: String,
    pub change_kinds: Vec<String>,
    pub description: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: Timestamp,
}

/// Input for appending one operation-log entry.
///
/// Built by the lifecycle manager, never from raw request input -- the
/// closed enums keep unknown operations and change kinds out of storage.
#[derive(Debug, Clone)]
pub struct RecordOperation {
    pub artifact_id: DbId,
    pub version_id: Option<DbId>,
    pub actor_id: DbId,
    pub operation: OperationKind,
    pub change_kinds: Vec<ChangeKind>,
    pub description: Option<String>,
    pub metadata: Option<Value>,
}
