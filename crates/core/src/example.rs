//! Example-value generation for schema nodes.
//!
//! Draft creation fills in example values for newly added parameter and body
//! fields so the "try it out" proxy always has something to send. The
//! generator is a plain synchronous function; callers treat it as an opaque
//! collaborator.

use serde_json::{json, Map, Value};

/// Produce an example value for a schema-shaped JSON node.
///
/// Honors an explicit `example` key when present; otherwise derives a
/// placeholder from `type` (and recurses into `properties` / `items`).
/// Unknown or missing types yield an empty string, never an error.
pub fn example_from_schema(schema: &Value) -> Value {
    if let Some(example) = schema.get("example") {
        return example.clone();
    }

    match schema.get("type").and_then(Value::as_str) {
        Some("string") => json!(""),
        Some("integer") => json!(0),
        Some("number") => json!(0.0),
        Some("boolean") => json!(false),
        Some("array") => {
            let item = schema
                .get("items")
                .map(example_from_schema)
                .unwrap_or(json!(""));
            json!([item])
        }
        Some("object") => {
            let mut obj = Map::new();
            if let Some(props) = schema.get("properties").and_then(Value::as_object) {
                for (key, prop) in props {
                    obj.insert(key.clone(), example_from_schema(prop));
                }
            }
            Value::Object(obj)
        }
        _ => json!(""),
    }
}

/// Fill missing `example` values on every element of a parameter array.
///
/// Elements that already carry an example, or that are not objects, are left
/// untouched. Non-array input is left untouched as well.
pub fn fill_parameter_examples(params: &mut Value) {
    let Some(entries) = params.as_array_mut() else {
        return;
    };
    for entry in entries {
        let Some(obj) = entry.as_object_mut() else {
            continue;
        };
        if obj.contains_key("example") {
            continue;
        }
        let generated = example_from_schema(&Value::Object(obj.clone()));
        obj.insert("example".to_string(), generated);
    }
}
