/*!
 * Common test utilities for the localesync test suite
 */

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use localesync::app_config::{Config, PathsConfig};
use localesync::vcs::PreviousRevisionProvider;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs to the test output; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A throwaway project with the locale layout the pipelines expect:
/// `locales/<lang>/*.json`, `variants/index.json` + `variants/<tool>/<variant>.json`
/// and a legacy `variant-pages.json`.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        init_logging();
        Ok(Self { dir: create_temp_dir()? })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `value` pretty-printed at `relative`, creating directories
    pub fn write_json(&self, relative: &str, value: &Value) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(value)?;
        create_test_file(self.root(), relative, &content)
    }

    pub fn read_json(&self, relative: &str) -> Result<Value> {
        let content = fs::read_to_string(self.path(relative))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Config over this project's layout, with no rate limit delay
    pub fn config(&self, languages: &[&str]) -> Config {
        let mut config = Config::default();
        config.target_languages = languages.iter().map(|l| l.to_string()).collect();
        config.paths = PathsConfig {
            locales_dir: PathBuf::from("locales"),
            variants_dir: PathBuf::from("variants"),
            legacy_variants_file: PathBuf::from("variant-pages.json"),
        };
        config.translation.common.rate_limit_delay_ms = 0;
        config
    }

    /// Write `variants/index.json` listing `tools`
    pub fn write_variant_index(&self, tools: &[&str]) -> Result<PathBuf> {
        let entries: Vec<Value> = tools
            .iter()
            .map(|tool| serde_json::json!({"key": tool, "name": tool, "directory": tool, "variantCount": 1}))
            .collect();
        self.write_json(
            "variants/index.json",
            &serde_json::json!({"tools": entries, "lastUpdated": "2025-01-01"}),
        )
    }
}

/// Revision provider with fixed previous versions and change lists
#[derive(Default)]
pub struct InMemoryRevisions {
    previous: HashMap<PathBuf, Value>,
    changed: Vec<PathBuf>,
}

impl InMemoryRevisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as the committed version of `path`
    pub fn with_previous(mut self, path: PathBuf, value: Value) -> Self {
        self.previous.insert(path, value);
        self
    }

    /// Report `path` as changed since the previous revision
    pub fn with_changed(mut self, path: PathBuf) -> Self {
        self.changed.push(path);
        self
    }
}

impl PreviousRevisionProvider for InMemoryRevisions {
    fn previous_version(&self, path: &Path) -> Option<Value> {
        self.previous.get(path).cloned()
    }

    fn changed_files(&self, _pathspec: &str) -> Vec<PathBuf> {
        self.changed.clone()
    }
}
