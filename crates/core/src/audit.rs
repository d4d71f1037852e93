//! Operation-log vocabulary.
//!
//! Lives in `core` (zero internal deps) so both the repository layer and any
//! future worker or CLI tooling share one closed set of operation kinds.

use serde::{Deserialize, Serialize};

/// The kind of state transition an operation-log entry documents.
///
/// `Create` covers an artifact's first version; `Update` covers every
/// subsequent draft created by an edit. Retention deletions are reclamation,
/// not actor-initiated transitions, and have no kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Update,
    Publish,
    Archive,
    Rollback,
}

impl OperationKind {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Publish => "publish",
            Self::Archive => "archive",
            Self::Rollback => "rollback",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
