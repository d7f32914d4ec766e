/*!
 * Excluded keys.
 *
 * Some keys of variant content (style defaults, example prompts, embedded
 * posts) must never reach the translator. They are pulled out of the tree by
 * name at any depth before translation and put back verbatim afterwards.
 *
 * Extracted values are addressed by a dotted path with `[i]` array indices,
 * e.g. `content.examples[2].placeholderText`. Key names are assumed not to
 * contain `.` or `[`: a key `a.b` and a nested `a` → `b` share a path, so a
 * value withheld under one of them is restored under both.
 */

use serde_json::{Map, Value};

/// Key names used by the variant pipelines unless configured otherwise
pub const DEFAULT_EXCLUDED_KEYS: &[&str] = &["defaultStyle", "placeholderText", "xposts"];

/// A set of key names to withhold from translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedKeys {
    keys: Vec<String>,
}

/// One withheld value and where it came from
#[derive(Debug, Clone, PartialEq)]
struct ExtractedEntry {
    /// Path of the object that held the key ("" for the root)
    parent: String,
    key: String,
    value: Value,
}

/// Values removed by [`ExcludedKeys::extract`], in traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedKeys {
    entries: Vec<ExtractedEntry>,
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

impl ExcludedKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Return a copy of `tree` without any excluded key, plus the removed values.
    pub fn extract(&self, tree: &Value) -> (Value, ExtractedKeys) {
        let mut extracted = ExtractedKeys::default();
        let processed = self.extract_at(tree, "", &mut extracted);
        (processed, extracted)
    }

    fn extract_at(&self, node: &Value, path: &str, extracted: &mut ExtractedKeys) -> Value {
        match node {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.extract_at(item, &index_path(path, i), extracted))
                    .collect(),
            ),
            Value::Object(map) => {
                let mut processed = Map::new();
                for (key, value) in map {
                    if self.contains(key) {
                        extracted.entries.push(ExtractedEntry {
                            parent: path.to_string(),
                            key: key.clone(),
                            value: value.clone(),
                        });
                        continue;
                    }
                    let current = child_path(path, key);
                    processed.insert(key.clone(), self.extract_at(value, &current, extracted));
                }
                Value::Object(processed)
            }
            scalar => scalar.clone(),
        }
    }
}

impl ExtractedKeys {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Withheld value at a full dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| child_path(&e.parent, &e.key) == path)
            .map(|e| &e.value)
    }

    /// Full paths of every withheld value
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| child_path(&e.parent, &e.key)).collect()
    }

    /// Put the withheld values back into a translated tree.
    ///
    /// A value is re-inserted wherever the traversal reaches an object whose
    /// path equals the recorded parent path, overwriting whatever the
    /// translator left under that key.
    pub fn restore(&self, translated: &Value) -> Value {
        if self.entries.is_empty() {
            return translated.clone();
        }
        self.restore_at(translated, "")
    }

    fn restore_at(&self, node: &Value, path: &str) -> Value {
        match node {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.restore_at(item, &index_path(path, i)))
                    .collect(),
            ),
            Value::Object(map) => {
                let mut result = map.clone();
                for entry in self.entries.iter().filter(|e| e.parent == path) {
                    result.insert(entry.key.clone(), entry.value.clone());
                }
                for (key, value) in result.iter_mut() {
                    let current = child_path(path, key);
                    *value = self.restore_at(value, &current);
                }
                Value::Object(result)
            }
            scalar => scalar.clone(),
        }
    }
}

impl Default for ExcludedKeys {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_KEYS.iter().copied())
    }
}
