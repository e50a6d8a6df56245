//! Response Normalizer: strips empty values out of parsed model output.
//!
//! A value is "empty" when it is `null`, `""`, `{}` or `[]`. Children are
//! normalized first, so a container that only held empties is itself dropped
//! by its parent. The root value is never removed, only emptied.

use serde_json::{Map, Value};

/// Recursively removes empty entries from objects and arrays.
///
/// Scalars (numbers, booleans, non-empty strings) pass through unchanged and
/// array order is preserved. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let cleaned: Map<String, Value> = map
                .into_iter()
                .map(|(key, child)| (key, normalize(child)))
                .filter(|(_, child)| !is_empty(child))
                .collect();
            Value::Object(cleaned)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(normalize)
                .filter(|child| !is_empty(child))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
