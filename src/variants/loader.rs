/*!
 * Variant loader.
 *
 * Tools are page templates; each tool has named variants whose content
 * lives either in one file per variant under the variants directory
 * (`index.json` + `<tool>/<variant>.json`, the separated layout) or in a
 * single legacy file keyed by tool. Non-source locales are served by
 * overlaying `locales/<locale>/variants/<tool>/<variant>.json` on the base
 * content.
 */

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::cache::{CachePort, InMemoryCache};
use crate::app_config::Config;
use crate::errors::LoaderError;
use crate::file_utils::FileManager;

/// Name of the index file of the separated layout
pub const INDEX_FILE: &str = "index.json";

/// One entry of `index.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolIndex {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub variant_count: usize,
}

/// Contents of `index.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantIndex {
    pub tools: Vec<ToolIndex>,
    #[serde(default)]
    pub last_updated: String,
}

/// All variants of one tool, in file or document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolData {
    #[serde(default)]
    pub base_template: String,
    #[serde(default)]
    pub variants: Map<String, Value>,
}

/// Loader statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderStats {
    pub tools: usize,
    pub variants: usize,
    pub using_separate_files: bool,
    pub cache_size: usize,
}

/// A page path generated for every tool, variant and locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPath {
    pub tool: String,
    pub variant: String,
    pub locale: Option<String>,
}

/// Where the loader looks for its files
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderPaths {
    pub variants_dir: PathBuf,
    pub legacy_file: PathBuf,
    pub locales_dir: PathBuf,
    /// Locale whose content is the untranslated base
    pub source_locale: String,
}

impl LoaderPaths {
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self {
            variants_dir: config.resolve(root, &config.paths.variants_dir),
            legacy_file: config.resolve(root, &config.paths.legacy_variants_file),
            locales_dir: config.resolve(root, &config.paths.locales_dir),
            source_locale: config.source_language.clone(),
        }
    }
}

const INDEX_CACHE_KEY: &str = "index";

/// Lazy, cached reader of variant content
pub struct VariantLoader {
    paths: LoaderPaths,
    blocked_keywords: Vec<String>,
    index_cache: Box<dyn CachePort<VariantIndex>>,
    tool_cache: Box<dyn CachePort<ToolData>>,
    variant_cache: Box<dyn CachePort<Value>>,
}

impl VariantLoader {
    /// Loader with in-memory caches
    pub fn new(paths: LoaderPaths, blocked_keywords: Vec<String>) -> Self {
        Self::with_caches(
            paths,
            blocked_keywords,
            Box::new(InMemoryCache::<VariantIndex>::new("variant index")),
            Box::new(InMemoryCache::<ToolData>::new("tool")),
            Box::new(InMemoryCache::<Value>::new("variant")),
        )
    }

    /// Loader with caller-provided cache backends
    pub fn with_caches(
        paths: LoaderPaths,
        blocked_keywords: Vec<String>,
        index_cache: Box<dyn CachePort<VariantIndex>>,
        tool_cache: Box<dyn CachePort<ToolData>>,
        variant_cache: Box<dyn CachePort<Value>>,
    ) -> Self {
        Self {
            paths,
            blocked_keywords,
            index_cache,
            tool_cache,
            variant_cache,
        }
    }

    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(
            LoaderPaths::from_config(config, root),
            config.variants.blocked_keywords.clone(),
        )
    }

    pub fn paths(&self) -> &LoaderPaths {
        &self.paths
    }

    /// True when `key` contains a blocked keyword (case-insensitive)
    pub fn is_blocked(&self, key: &str) -> bool {
        let lowered = key.to_lowercase();
        self.blocked_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| lowered.contains(&k.to_lowercase()))
    }

    /// The separated layout is in use when `index.json` exists
    pub fn uses_separate_files(&self) -> bool {
        FileManager::file_exists(self.paths.variants_dir.join(INDEX_FILE))
    }

    /// Base file of a variant in the separated layout
    pub fn variant_file_path(&self, tool: &str, variant: &str) -> PathBuf {
        self.paths.variants_dir.join(tool).join(format!("{}.json", variant))
    }

    /// Translation file of a variant for `locale`
    pub fn translation_file_path(&self, locale: &str, tool: &str, variant: &str) -> PathBuf {
        self.paths
            .locales_dir
            .join(locale)
            .join("variants")
            .join(tool)
            .join(format!("{}.json", variant))
    }

    /// Read `index.json`, cached after the first success
    pub fn load_variant_index(&self) -> Result<VariantIndex, LoaderError> {
        if let Some(index) = self.index_cache.get(INDEX_CACHE_KEY) {
            return Ok(index);
        }

        let index_path = self.paths.variants_dir.join(INDEX_FILE);
        if !FileManager::file_exists(&index_path) {
            return Err(LoaderError::IndexNotFound(index_path));
        }

        let content = std::fs::read_to_string(&index_path).map_err(|e| LoaderError::IndexUnreadable(e.to_string()))?;
        let index: VariantIndex =
            serde_json::from_str(&content).map_err(|e| LoaderError::IndexUnreadable(e.to_string()))?;

        self.index_cache.set(INDEX_CACHE_KEY, index.clone());
        Ok(index)
    }

    /// Content of one variant as served for `locale` (source locale when `None`).
    ///
    /// Returns `None` for blocked keys, unknown variants and unreadable base files.
    pub fn load_variant_data(&self, tool: &str, variant: &str, locale: Option<&str>) -> Option<Value> {
        if self.is_blocked(tool) || self.is_blocked(variant) {
            return None;
        }

        let locale = locale.unwrap_or(self.paths.source_locale.as_str());
        let cache_key = format!("{}/{}/{}", tool, variant, locale);
        if let Some(cached) = self.variant_cache.get(&cache_key) {
            return Some(cached);
        }

        if !self.uses_separate_files() {
            return self.load_legacy_tool_data(tool)?.variants.get(variant).cloned();
        }

        let base_path = self.variant_file_path(tool, variant);
        if !FileManager::file_exists(&base_path) {
            return None;
        }

        let mut data = match FileManager::read_json(&base_path) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to load variant data for {}/{}: {}", tool, variant, e);
                return None;
            }
        };

        if locale != self.paths.source_locale {
            let translation_path = self.translation_file_path(locale, tool, variant);
            if translation_path.exists() {
                match FileManager::read_json(&translation_path) {
                    Ok(translated) => data = overlay_translation(&data, &translated),
                    Err(_) => warn!(
                        "Failed to load translation for {}/{} in {}, using base content",
                        tool, variant, locale
                    ),
                }
            }
        }

        self.variant_cache.set(&cache_key, data.clone());
        Some(data)
    }

    /// Every non-blocked variant of a tool
    pub fn load_tool_data(&self, tool: &str) -> Option<ToolData> {
        if self.is_blocked(tool) {
            return None;
        }

        if let Some(cached) = self.tool_cache.get(tool) {
            return Some(cached);
        }

        if !self.uses_separate_files() {
            return self.load_legacy_tool_data(tool);
        }

        let tool_dir = self.paths.variants_dir.join(tool);
        if !FileManager::dir_exists(&tool_dir) {
            return None;
        }

        let files = match FileManager::list_files(&tool_dir, "json") {
            Ok(files) => files,
            Err(e) => {
                error!("Failed to load tool data for {}: {}", tool, e);
                return None;
            }
        };

        let mut variants = Map::new();
        for file in files {
            let Some(variant) = file.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            if self.is_blocked(&variant) {
                continue;
            }
            match FileManager::read_json(&file) {
                Ok(data) => {
                    variants.insert(variant, data);
                }
                Err(e) => {
                    error!("Failed to load tool data for {}: {}", tool, e);
                    return None;
                }
            }
        }

        let tool_data = ToolData {
            base_template: tool.to_string(),
            variants,
        };
        self.tool_cache.set(tool, tool_data.clone());
        Some(tool_data)
    }

    fn read_legacy_file(&self) -> Option<Map<String, Value>> {
        if !FileManager::file_exists(&self.paths.legacy_file) {
            return None;
        }
        match FileManager::read_json(&self.paths.legacy_file) {
            Ok(Value::Object(all)) => Some(all),
            Ok(_) => {
                error!("Legacy variant file {:?} is not an object", self.paths.legacy_file);
                None
            }
            Err(e) => {
                error!("Failed to load legacy variant data: {}", e);
                None
            }
        }
    }

    fn load_legacy_tool_data(&self, tool: &str) -> Option<ToolData> {
        let all = self.read_legacy_file()?;
        let raw = all.get(tool)?.clone();

        match serde_json::from_value::<ToolData>(raw) {
            Ok(tool_data) => {
                self.tool_cache.set(tool, tool_data.clone());
                Some(tool_data)
            }
            Err(e) => {
                error!("Failed to load legacy tool data for {}: {}", tool, e);
                None
            }
        }
    }

    /// All tools in index (or legacy document) order
    pub fn load_all_tool_data(&self) -> Result<Vec<(String, ToolData)>, LoaderError> {
        if self.uses_separate_files() {
            let index = self.load_variant_index()?;
            return Ok(index
                .tools
                .iter()
                .filter_map(|tool| self.load_tool_data(&tool.key).map(|data| (tool.key.clone(), data)))
                .collect());
        }

        let Some(all) = self.read_legacy_file() else {
            return Ok(Vec::new());
        };

        Ok(all
            .into_iter()
            .filter(|(tool, _)| !self.is_blocked(tool))
            .filter_map(|(tool, raw)| match serde_json::from_value::<ToolData>(raw) {
                Ok(data) => Some((tool, data)),
                Err(e) => {
                    warn!("Skipping malformed legacy tool {}: {}", tool, e);
                    None
                }
            })
            .collect())
    }

    /// Non-blocked variant keys of a tool
    pub fn get_variant_keys(&self, tool: &str) -> Vec<String> {
        self.load_tool_data(tool)
            .map(|data| data.variants.keys().filter(|v| !self.is_blocked(v)).cloned().collect())
            .unwrap_or_default()
    }

    pub fn tool_exists(&self, tool: &str) -> Result<bool, LoaderError> {
        if self.uses_separate_files() {
            return Ok(self.load_variant_index()?.tools.iter().any(|t| t.key == tool));
        }
        Ok(self.load_tool_data(tool).is_some())
    }

    pub fn variant_exists(&self, tool: &str, variant: &str) -> bool {
        self.load_tool_data(tool)
            .is_some_and(|data| data.variants.contains_key(variant))
    }

    pub fn get_all_tool_keys(&self) -> Result<Vec<String>, LoaderError> {
        if self.uses_separate_files() {
            return Ok(self.load_variant_index()?.tools.into_iter().map(|t| t.key).collect());
        }
        Ok(self.load_all_tool_data()?.into_iter().map(|(key, _)| key).collect())
    }

    /// One path per tool, variant and locale. With no locales, one path per
    /// variant without a locale.
    pub fn static_paths(&self, locales: &[String]) -> Result<Vec<StaticPath>, LoaderError> {
        let mut paths = Vec::new();

        for tool in self.get_all_tool_keys()? {
            for variant in self.get_variant_keys(&tool) {
                if locales.is_empty() {
                    paths.push(StaticPath {
                        tool: tool.clone(),
                        variant,
                        locale: None,
                    });
                    continue;
                }
                for locale in locales {
                    paths.push(StaticPath {
                        tool: tool.clone(),
                        variant: variant.clone(),
                        locale: Some(locale.clone()),
                    });
                }
            }
        }

        debug!("Generated {} static paths", paths.len());
        Ok(paths)
    }

    /// Forget everything read so far
    pub fn clear_cache(&self) {
        self.index_cache.clear();
        self.tool_cache.clear();
        self.variant_cache.clear();
    }

    pub fn stats(&self) -> Result<LoaderStats, LoaderError> {
        let all = self.load_all_tool_data()?;
        Ok(LoaderStats {
            tools: all.len(),
            variants: all.iter().map(|(_, data)| data.variants.len()).sum(),
            using_separate_files: self.uses_separate_files(),
            cache_size: self.tool_cache.len(),
        })
    }
}

/// Overlay a translation on base variant content: top-level keys of the
/// translation win, and `content` is merged one level deep.
pub fn overlay_translation(base: &Value, translated: &Value) -> Value {
    let mut result = base.as_object().cloned().unwrap_or_default();
    let Some(translated_map) = translated.as_object() else {
        return Value::Object(result);
    };

    for (key, value) in translated_map {
        result.insert(key.clone(), value.clone());
    }

    let base_content = base.get("content").and_then(Value::as_object);
    let translated_content = translated.get("content").and_then(Value::as_object);
    if base_content.is_some() || translated_content.is_some() {
        let mut content = base_content.cloned().unwrap_or_default();
        for (key, value) in translated_content.into_iter().flatten() {
            content.insert(key.clone(), value.clone());
        }
        result.insert("content".to_string(), Value::Object(content));
    }

    Value::Object(result)
}
