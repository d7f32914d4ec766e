use anyhow::{Context, Result};
use chrono::Local;
use serde_json::{Map, Value};
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::SyncError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory tree, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        Self::collect_files(dir.as_ref(), extension, usize::MAX)
    }

    /// Files with a specific extension directly inside a directory, sorted by path
    pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        Self::collect_files(dir.as_ref(), extension, 1)
    }

    fn collect_files(dir: &Path, extension: &str, max_depth: usize) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).max_depth(max_depth).follow_links(true) {
            let entry = entry.with_context(|| format!("Failed to read directory entry in {:?}", dir))?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Read and parse a JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value, SyncError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Read a source-locale file; a missing file is `MissingSourceFile`
    pub fn read_source_json<P: AsRef<Path>>(path: P) -> Result<Value, SyncError> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(SyncError::MissingSourceFile(path.to_path_buf()));
        }
        Self::read_json(path)
    }

    /// Read a target-locale file.
    ///
    /// A missing file is an empty tree. A file that exists but cannot be
    /// read or parsed is `TargetFileUnreadable`.
    pub fn read_target_json<P: AsRef<Path>>(path: P) -> Result<Value, SyncError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Value::Object(Map::new()));
        }
        Self::read_json(path).map_err(|e| SyncError::TargetFileUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write a tree as 2-space indented JSON with a trailing newline,
    /// creating parent directories as needed.
    pub fn write_json<P: AsRef<Path>>(path: P, tree: &Value) -> Result<(), SyncError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(tree)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }
}
