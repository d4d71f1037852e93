//! Closed set of "what changed" tags carried by versions and log entries.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A machine-readable tag describing one aspect of a version change.
///
/// Stored as `TEXT[]` in the database using [`ChangeKind::as_str`]; modeled
/// as a closed enum so the compiler rejects unknown kinds at every write
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    /// Name, method, path, description, or tags changed.
    BasicInfo,
    /// Header, query, or path parameters changed.
    RequestParam,
    /// Request body changed.
    RequestBody,
    /// Responses or mock configuration changed.
    Response,
    /// First version of an artifact.
    Create,
    /// Content removed.
    Delete,
    /// Version created by rolling back to a historical snapshot.
    Restore,
}

impl ChangeKind {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicInfo => "BASIC_INFO",
            Self::RequestParam => "REQUEST_PARAM",
            Self::RequestBody => "REQUEST_BODY",
            Self::Response => "RESPONSE",
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
            Self::Restore => "RESTORE",
        }
    }

    /// Convert a kind set to its storage representation.
    pub fn set_to_strings(kinds: &[ChangeKind]) -> Vec<String> {
        kinds.iter().map(|k| k.as_str().to_string()).collect()
    }

    /// Derive the kind set from the tracked-field names of a computed diff.
    ///
    /// Field names that map to the same kind collapse to one entry; the
    /// result is sorted and deduplicated so equal diffs yield equal sets.
    pub fn from_changed_fields<'a, I>(fields: I) -> Vec<ChangeKind>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut kinds: Vec<ChangeKind> = fields
            .into_iter()
            .filter_map(Self::for_tracked_field)
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    /// Map a tracked snapshot field name to its change kind.
    fn for_tracked_field(field: &str) -> Option<ChangeKind> {
        match field {
            "name" | "method" | "path" | "description" | "tags" => Some(Self::BasicInfo),
            "header_params" | "query_params" | "path_params" => Some(Self::RequestParam),
            "request_body" => Some(Self::RequestBody),
            "responses" | "mock_config" => Some(Self::Response),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC_INFO" => Ok(Self::BasicInfo),
            "REQUEST_PARAM" => Ok(Self::RequestParam),
            "REQUEST_BODY" => Ok(Self::RequestBody),
            "RESPONSE" => Ok(Self::Response),
            "CREATE" => Ok(Self::Create),
            "DELETE" => Ok(Self::Delete),
            "RESTORE" => Ok(Self::Restore),
            other => Err(CoreError::Internal(format!(
                "Unknown change kind in storage: '{other}'"
            ))),
        }
    }
}
