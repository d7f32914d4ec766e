/*!
 * Tree merger.
 *
 * Folds a (translated) diff into an existing target tree. The merge only
 * adds or overwrites; keys the diff does not mention are left alone.
 */

use serde_json::{Map, Value};

/// Merge `changes` into `target` and return the merged tree.
///
/// - an array diff replaces the slot wholesale
/// - an object diff over an existing object recurses
/// - anything else replaces the existing value
pub fn merge_changes(target: &Value, changes: &Value) -> Value {
    let Value::Object(change_map) = changes else {
        return changes.clone();
    };

    let mut result: Map<String, Value> = target.as_object().cloned().unwrap_or_default();

    for (key, change) in change_map {
        let merged = match (change, result.get(key)) {
            (Value::Object(_), Some(existing @ Value::Object(_))) => merge_changes(existing, change),
            _ => change.clone(),
        };
        result.insert(key.clone(), merged);
    }

    Value::Object(result)
}
