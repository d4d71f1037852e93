//! Comparison cache entity model.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use apidock_core::types::{DbId, Timestamp};

/// A row from the `comparison_cache` table: one previously computed diff for
/// an ordered version pair. Valid forever -- snapshots are immutable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComparisonEntry {
    pub id: DbId,
    pub from_version_id: DbId,
    pub to_version_id: DbId,
    pub diff: Value,
    pub created_at: Timestamp,
}
