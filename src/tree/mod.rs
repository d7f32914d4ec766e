/*!
 * Localized content trees.
 *
 * A locale file is a `serde_json::Value` whose object key order is preserved.
 * This module holds the three tree operations the sync pipelines are built on:
 *
 * - `diff`: compute the part of a source tree that still needs translating
 * - `merge`: fold a translated diff back into an existing target tree
 * - `exclude`: withhold named keys from translation and put them back afterwards
 */

use serde_json::Value;

pub mod diff;
pub mod exclude;
pub mod merge;

pub use diff::{DiffMode, diff_trees, find_differences, find_missing};
pub use exclude::{ExcludedKeys, ExtractedKeys};
pub use merge::merge_changes;

/// Coarse type class of a node, matching what JavaScript `typeof` reports
/// for parsed JSON. `null`, arrays and objects all share `Object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Object,
    String,
    Number,
    Boolean,
}

impl TypeClass {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Object,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
        }
    }
}

/// True when a diff carries nothing to translate: `{}` or `[]`.
pub fn is_empty_diff(diff: &Value) -> bool {
    match diff {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Number of leaf values in a tree. Empty containers count as zero.
pub fn count_leaves(tree: &Value) -> usize {
    match tree {
        Value::Object(map) => map.values().map(count_leaves).sum(),
        Value::Array(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

/// Equality of two scalars the way `!==` sees them: numbers compare by
/// numeric value, so `1` and `1.0` are the same.
pub(crate) fn scalars_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Equality of the serialized form of two nodes. Object key order matters,
/// numbers compare by value.
pub(crate) fn serialized_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| serialized_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|((kx, vx), (ky, vy))| kx == ky && serialized_equal(vx, vy))
        }
        _ => scalars_equal(a, b),
    }
}
