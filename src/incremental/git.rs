// src/incremental/git.rs

//! Git-backed change detection.
//!
//! Shelling out to git is modeled as the injected [`GitClient`] capability so
//! the strategy can be tested against a fake implementation without a real
//! repository.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use crate::discover::path_utils::relative_str;
use crate::errors::{Result, SitescanError};
use crate::incremental::strategy::ChangeStrategy;
use crate::types::Marker;

/// Minimal view of a version-control system, as needed by the git strategy.
pub trait GitClient: Send + Sync + Debug {
    /// Repository toplevel for the repo containing `dir`.
    /// Fails with `Environment` when `dir` is not inside a repository.
    fn base_dir(&self, dir: &Path) -> Result<PathBuf>;

    /// Current HEAD revision id.
    fn current_revision(&self, dir: &Path) -> Result<String>;

    /// Paths changed between `revision` and HEAD, relative to the repository
    /// toplevel. Fails with `InvalidReference` when `revision` does not
    /// resolve.
    fn changes_since(&self, dir: &Path, revision: &str) -> Result<Vec<String>>;
}

/// `GitClient` that invokes the `git` binary as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct CommandGit;

impl CommandGit {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<(bool, String, String)> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SitescanError::Environment(
                        "git binary not found on PATH".to_string(),
                    )
                } else {
                    SitescanError::IoError(e)
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        Ok((output.status.success(), stdout, stderr))
    }
}

fn is_fatal(stderr: &str) -> bool {
    stderr.trim_start().starts_with("fatal:")
}

impl GitClient for CommandGit {
    fn base_dir(&self, dir: &Path) -> Result<PathBuf> {
        let (ok, stdout, stderr) =
            self.run(dir, &["rev-parse", "--show-toplevel"])?;
        if !ok || is_fatal(&stderr) {
            return Err(SitescanError::Environment(format!(
                "{dir:?} is not inside a git repository: {}",
                stderr.trim()
            )));
        }
        Ok(PathBuf::from(stdout.trim()))
    }

    fn current_revision(&self, dir: &Path) -> Result<String> {
        let (ok, stdout, stderr) = self.run(dir, &["rev-parse", "HEAD"])?;
        if !ok || is_fatal(&stderr) {
            return Err(SitescanError::Environment(format!(
                "cannot resolve HEAD in {dir:?}: {}",
                stderr.trim()
            )));
        }
        Ok(stdout.trim().to_string())
    }

    fn changes_since(&self, dir: &Path, revision: &str) -> Result<Vec<String>> {
        let range = format!("{revision}..HEAD");
        let (ok, stdout, stderr) =
            self.run(dir, &["diff", "--name-only", &range])?;
        if !ok || is_fatal(&stderr) {
            return Err(SitescanError::InvalidReference(format!(
                "revision {revision:?} does not resolve: {}",
                stderr.trim()
            )));
        }
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Revision-based strategy.
///
/// Construction eagerly probes the repository (git reachable, tracking root
/// inside a repo) so a misconfigured environment fails before any filtering
/// starts. The marker is the HEAD revision at finalize time.
#[derive(Debug, Clone)]
pub struct GitStrategy {
    client: Arc<dyn GitClient>,
    tracking_root: PathBuf,
    repo_root: PathBuf,
}

impl GitStrategy {
    pub fn new(client: Arc<dyn GitClient>, tracking_root: impl Into<PathBuf>) -> Result<Self> {
        let tracking_root = tracking_root.into();
        let repo_root = client.base_dir(&tracking_root)?;
        debug!(?repo_root, ?tracking_root, "git strategy bound");
        Ok(Self {
            client,
            tracking_root,
            repo_root,
        })
    }
}

impl ChangeStrategy for GitStrategy {
    fn changed_since(&self, marker: &str) -> Result<BTreeSet<String>> {
        let mut changed = BTreeSet::new();
        for path in self.client.changes_since(&self.tracking_root, marker)? {
            // Diff paths are toplevel-relative; keep only those under the
            // tracking root, re-rooted onto it.
            let full = self.repo_root.join(&path);
            if let Some(rel) = relative_str(&self.tracking_root, &full) {
                changed.insert(rel);
            }
        }
        Ok(changed)
    }

    fn current_marker(&self) -> Result<Marker> {
        self.client.current_revision(&self.tracking_root)
    }
}
