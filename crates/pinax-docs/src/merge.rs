//! Recursive merging of JSON values.
//!
//! Objects are merged key by key, arrays element by element (by index) and
//! every other source value, `null` included, overwrites the target. When the
//! two sides have different shapes the source replaces the target outright.

use serde_json::Value;

/// Deep-merges `source` into `target`.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (index, value) in source.iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => deep_merge(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Deep-merges `source` into `target`, returning the result.
#[must_use]
pub fn merged(mut target: Value, source: &Value) -> Value {
    deep_merge(&mut target, source);
    target
}
