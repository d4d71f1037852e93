//! Version lifecycle status.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a version.
///
/// - `Draft`    -- editable history entry, never been live.
/// - `Live`     -- the single authoritative version of its artifact.
/// - `Archived` -- historical; the only state eligible for retention deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    Live,
    Archived,
}

impl VersionStatus {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Live => "live",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VersionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "live" => Ok(Self::Live),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::Internal(format!(
                "Unknown version status in storage: '{other}'"
            ))),
        }
    }
}
