//! The immutable snapshot payload and its copy-on-write merge.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

/// The full denormalized definition of an artifact at one revision.
///
/// A snapshot is created atomically with its version and never mutated; an
/// edit always produces a new version + snapshot pair. Structured collections
/// (parameters, bodies, responses, mock config) are JSON documents; scalar
/// display fields are typed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPayload {
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
}

impl Default for SnapshotPayload {
    fn default() -> Self {
        Self {
            name: String::new(),
            method: None,
            path: None,
            description: None,
            tags: Vec::new(),
            header_params: json!([]),
            query_params: json!([]),
            path_params: json!([]),
            request_body: json!({}),
            responses: json!([]),
            mock_config: json!({}),
        }
    }
}

/// The caller-supplied edit applied when creating a draft.
///
/// Every field is optional; absent fields fall back to the artifact's
/// current live snapshot, then to hard defaults. The precedence order is
/// enforced by [`SnapshotPayload::merged`], not by the serialization layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotPatch {
    pub name: Option<String>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub header_params: Option<Value>,
    pub query_params: Option<Value>,
    pub path_params: Option<Value>,
    pub request_body: Option<Value>,
    pub responses: Option<Value>,
    pub mock_config: Option<Value>,
}

impl SnapshotPayload {
    /// Build a draft snapshot: patch fields win, then the base (the current
    /// live snapshot, if any), then hard defaults.
    ///
    /// A draft is always a full record -- the one field with no usable
    /// default is `name`, which must come from the patch or the base.
    pub fn merged(base: Option<&SnapshotPayload>, patch: &SnapshotPatch) -> Result<Self, CoreError> {
        let defaults = SnapshotPayload::default();
        let base = base.unwrap_or(&defaults);

        let name = match &patch.name {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ if !base.name.is_empty() => base.name.clone(),
            _ => {
                return Err(CoreError::Validation(
                    "A draft needs a name: none supplied and the artifact has no live version"
                        .into(),
                ))
            }
        };

        Ok(Self {
            name,
            method: patch.method.clone().or_else(|| base.method.clone()),
            path: patch.path.clone().or_else(|| base.path.clone()),
            description: patch
                .description
                .clone()
                .or_else(|| base.description.clone()),
            tags: patch.tags.clone().unwrap_or_else(|| base.tags.clone()),
            header_params: patch
                .header_params
                .clone()
                .unwrap_or_else(|| base.header_params.clone()),
            query_params: patch
                .query_params
                .clone()
                .unwrap_or_else(|| base.query_params.clone()),
            path_params: patch
                .path_params
                .clone()
                .unwrap_or_else(|| base.path_params.clone()),
            request_body: patch
                .request_body
                .clone()
                .unwrap_or_else(|| base.request_body.clone()),
            responses: patch
                .responses
                .clone()
                .unwrap_or_else(|| base.responses.clone()),
            mock_config: patch
                .mock_config
                .clone()
                .unwrap_or_else(|| base.mock_config.clone()),
        })
    }
}
