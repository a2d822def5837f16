//! Recursive mapping merge.
//!
//! Used to layer override mappings onto defaults. Nested objects are merged
//! key by key; every other value (arrays included) is replaced wholesale by
//! the override.

use serde_json::{Map, Value};

/// Merges `overrides` into a copy of `base`, recursively.
///
/// Neither input is modified. The result lists `base`'s keys in `base`'s
/// order, followed by keys only present in `overrides` in their order.
///
/// # Examples
///
/// ```
/// use flow_helpers::collections::merge_dicts;
/// use serde_json::json;
///
/// let base = json!({"a": {"x": 1}, "b": 2});
/// let overrides = json!({"a": {"y": 2}, "b": 3});
/// let merged = merge_dicts(base.as_object().unwrap(), overrides.as_object().unwrap());
/// assert_eq!(serde_json::Value::Object(merged), json!({"a": {"x": 1, "y": 2}, "b": 3}));
/// ```
#[must_use]
pub fn merge_dicts(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        let combined = match (merged.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(merge_dicts(existing, incoming))
            }
            _ => value.clone(),
        };
        // Replacing an existing key keeps its position
        merged.insert(key.clone(), combined);
    }
    merged
}

/// Merges two arbitrary values with the same rule as [`merge_dicts`].
///
/// Two objects merge; any other pair yields a copy of `overrides`.
#[must_use]
pub fn merge_values(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (Value::Object(a), Value::Object(b)) => Value::Object(merge_dicts(a, b)),
        _ => overrides.clone(),
    }
}
