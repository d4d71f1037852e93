//! Quota collaborator seam.
//!
//! The membership/quota service is outside this engine; it supplies the
//! per-artifact revision limit. The engine accepts the resolved number and
//! never re-derives it.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

/// Supplies the maximum number of versions an artifact may retain.
#[async_trait]
pub trait RevisionQuota: Send + Sync {
    async fn max_revisions(&self, artifact_id: DbId) -> Result<i64, CoreError>;
}

/// A quota that applies one configured limit to every artifact.
///
/// The production deployment resolves per-team limits upstream; a single
/// value from server configuration is the default wiring.
#[derive(Debug, Clone, Copy)]
pub struct FixedQuota {
    max_revisions: i64,
}

impl FixedQuota {
    pub fn new(max_revisions: i64) -> Self {
        Self { max_revisions }
    }
}

#[async_trait]
impl RevisionQuota for FixedQuota {
    async fn max_revisions(&self, _artifact_id: DbId) -> Result<i64, CoreError> {
        Ok(self.max_revisions)
    }
}
