//! Structural field-level comparison of two snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::snapshot::SnapshotPayload;

/// One changed field: the value on each side of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: Value,
    pub to: Value,
}

/// Mapping from tracked field name to its change.
///
/// A `BTreeMap` keeps field order stable, so serializing the same diff twice
/// produces byte-identical output -- the property the comparison cache's
/// determinism guarantee rests on.
pub type DiffPayload = BTreeMap<String, FieldChange>;

/// Compare two snapshots field by field.
///
/// Emits an entry only for tracked fields whose values are not deeply equal.
/// Directionality matters: `compute_diff(a, b)` and `compute_diff(b, a)`
/// swap the `from`/`to` sides and are cached separately.
pub fn compute_diff(from: &SnapshotPayload, to: &SnapshotPayload) -> DiffPayload {
    let mut diff = DiffPayload::new();

    push_if_changed(&mut diff, "name", json!(from.name), json!(to.name));
    push_if_changed(&mut diff, "method", json!(from.method), json!(to.method));
    push_if_changed(&mut diff, "path", json!(from.path), json!(to.path));
    push_if_changed(
        &mut diff,
        "description",
        json!(from.description),
        json!(to.description),
    );
    push_if_changed(&mut diff, "tags", json!(from.tags), json!(to.tags));
    push_if_changed(
        &mut diff,
        "header_params",
        from.header_params.clone(),
        to.header_params.clone(),
    );
    push_if_changed(
        &mut diff,
        "query_params",
        from.query_params.clone(),
        to.query_params.clone(),
    );
    push_if_changed(
        &mut diff,
        "path_params",
        from.path_params.clone(),
        to.path_params.clone(),
    );
    push_if_changed(
        &mut diff,
        "request_body",
        from.request_body.clone(),
        to.request_body.clone(),
    );
    push_if_changed(
        &mut diff,
        "responses",
        from.responses.clone(),
        to.responses.clone(),
    );
    push_if_changed(
        &mut diff,
        "mock_config",
        from.mock_config.clone(),
        to.mock_config.clone(),
    );

    diff
}

fn push_if_changed(diff: &mut DiffPayload, field: &str, from: Value, to: Value) {
    if from != to {
        diff.insert(field.to_string(), FieldChange { from, to });
    }
}
