/*!
 * Previous revisions of source files.
 *
 * The update pipelines diff a source file against its last committed
 * version. Where that version comes from is behind `PreviousRevisionProvider`;
 * `GitRevisionProvider` asks git.
 */

use log::{debug, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of last committed file versions
pub trait PreviousRevisionProvider: Send + Sync {
    /// Parsed previous version of `path`, or `None` when there is none
    /// (new file, not a repository, unparseable content).
    fn previous_version(&self, path: &Path) -> Option<Value>;

    /// Files matching `pathspec` that differ from the previous revision,
    /// as paths under the repository root.
    fn changed_files(&self, pathspec: &str) -> Vec<PathBuf>;
}

/// Revision provider backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitRevisionProvider {
    /// Directory git runs in; pathspecs and paths are relative to it
    repo_root: PathBuf,
    /// Revision to read previous versions from
    revision: String,
}

impl GitRevisionProvider {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            revision: "HEAD".to_string(),
        }
    }

    /// Compare against another revision than `HEAD`
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Path relative to the repository root with forward slashes
    fn git_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.repo_root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn run_git(&self, args: &[&str]) -> Option<String> {
        debug!("git {}", args.join(" "));
        match Command::new("git").args(args).current_dir(&self.repo_root).output() {
            Ok(output) if output.status.success() => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            Ok(output) => {
                debug!("git exited with {}: {}", output.status, String::from_utf8_lossy(&output.stderr).trim());
                None
            }
            Err(e) => {
                warn!("Failed to run git: {}", e);
                None
            }
        }
    }
}

impl PreviousRevisionProvider for GitRevisionProvider {
    fn previous_version(&self, path: &Path) -> Option<Value> {
        let git_path = self.git_path(path);
        // "./" makes the path relative to the working directory, not the repository top level
        let spec = format!("{}:./{}", self.revision, git_path);

        let parsed = self
            .run_git(&["show", &spec])
            .and_then(|content| serde_json::from_str::<Value>(&content).ok());

        if parsed.is_none() {
            info!("Could not get previous version for {}, treating as new file", git_path);
        }
        parsed
    }

    fn changed_files(&self, pathspec: &str) -> Vec<PathBuf> {
        let Some(output) = self.run_git(&["diff", "--name-only", "--relative", "--", pathspec]) else {
            warn!("Error getting changed files from git for {}", pathspec);
            return Vec::new();
        };

        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.repo_root.join(line))
            .collect()
    }
}
