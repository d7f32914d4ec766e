/*!
 * Tree differ.
 *
 * Walks the keys of the newer tree and keeps the parts that are new,
 * changed type, or changed value relative to the older one. Keys that only
 * exist in the older tree are never visited, so deletions are not tracked.
 */

use serde_json::{Map, Value};

use super::{TypeClass, is_empty_diff, scalars_equal, serialized_equal};

/// What counts as a difference for scalar leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Old and new are two revisions of the same source tree;
    /// a scalar whose value changed needs translating again.
    Changed,
    /// Old is a translated target tree; only keys it lacks (or holds with
    /// another type) need translating. Scalar values are expected to differ.
    Missing,
}

/// Keys of `new` that are absent, type-changed or value-changed in `old`.
pub fn find_differences(old: &Value, new: &Value) -> Value {
    diff_trees(old, new, DiffMode::Changed)
}

/// Keys of `source` that a translated `target` tree does not have yet.
pub fn find_missing(source: &Value, target: &Value) -> Value {
    diff_trees(target, source, DiffMode::Missing)
}

/// Diff `new` against `old`.
///
/// Arrays are atomic: if they serialize differently the whole new array is
/// returned, otherwise `[]`. An `old` that is not an object is walked as `{}`.
pub fn diff_trees(old: &Value, new: &Value, mode: DiffMode) -> Value {
    match new {
        Value::Array(_) => {
            if old.is_array() && serialized_equal(old, new) {
                Value::Array(Vec::new())
            } else {
                new.clone()
            }
        }
        Value::Object(new_map) => Value::Object(diff_objects(old.as_object(), new_map, mode)),
        // Locale files are objects at the root; a scalar root is handled
        // like a scalar leaf so the result is still meaningful.
        scalar => {
            if mode == DiffMode::Changed && !scalars_equal(old, scalar) {
                scalar.clone()
            } else {
                Value::Object(Map::new())
            }
        }
    }
}

fn diff_objects(old: Option<&Map<String, Value>>, new: &Map<String, Value>, mode: DiffMode) -> Map<String, Value> {
    let mut differences = Map::new();

    for (key, new_value) in new {
        let Some(old_value) = old.and_then(|m| m.get(key)) else {
            differences.insert(key.clone(), new_value.clone());
            continue;
        };

        if TypeClass::of(new_value) != TypeClass::of(old_value) {
            differences.insert(key.clone(), new_value.clone());
            continue;
        }

        match new_value {
            Value::Array(_) => {
                if !serialized_equal(new_value, old_value) {
                    differences.insert(key.clone(), new_value.clone());
                }
            }
            Value::Object(_) => {
                let nested = diff_trees(old_value, new_value, mode);
                if !is_empty_diff(&nested) {
                    differences.insert(key.clone(), nested);
                }
            }
            // null lands here too: it only matches its own kind
            scalar => {
                if mode == DiffMode::Changed && !scalars_equal(scalar, old_value) {
                    differences.insert(key.clone(), scalar.clone());
                }
            }
        }
    }

    differences
}
