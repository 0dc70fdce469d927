//! In-memory `GitClient` for deterministic strategy tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sitescan::errors::{Result, SitescanError};
use sitescan::incremental::GitClient;

/// Fake repository state.
///
/// - `base`: the pretend repository toplevel; `None` means "not a repository"
///   so construction probes fail with an environment error.
/// - Revisions must be registered with `know_revision` before
///   `changes_since` accepts them, mirroring how real git rejects unknown
///   references with a `fatal:` response.
#[derive(Debug, Default)]
pub struct FakeGit {
    base: Option<PathBuf>,
    head: Mutex<String>,
    known_revisions: Mutex<HashSet<String>>,
    /// Changes reported for `changes_since(rev)`, relative to `base`.
    changes: Mutex<HashMap<String, Vec<String>>>,
}

impl FakeGit {
    /// A fake that behaves as if `base` is a repository toplevel.
    pub fn in_repo(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
            head: Mutex::new("HEAD0".to_string()),
            ..Self::default()
        }
    }

    /// A fake that behaves as if no repository exists anywhere.
    pub fn no_repo() -> Self {
        Self::default()
    }

    pub fn set_head(&self, rev: &str) {
        *self.head.lock().unwrap() = rev.to_string();
        self.know_revision(rev);
    }

    pub fn know_revision(&self, rev: &str) {
        self.known_revisions.lock().unwrap().insert(rev.to_string());
    }

    /// Record that `path` (toplevel-relative) changed since `rev`.
    pub fn add_change_since(&self, rev: &str, path: &str) {
        self.know_revision(rev);
        self.changes
            .lock()
            .unwrap()
            .entry(rev.to_string())
            .or_default()
            .push(path.to_string());
    }
}

impl GitClient for FakeGit {
    fn base_dir(&self, dir: &Path) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => Err(SitescanError::Environment(format!(
                "{dir:?} is not inside a git repository: fatal: not a git repository"
            ))),
        }
    }

    fn current_revision(&self, _dir: &Path) -> Result<String> {
        if self.base.is_none() {
            return Err(SitescanError::Environment(
                "cannot resolve HEAD: fatal: not a git repository".to_string(),
            ));
        }
        Ok(self.head.lock().unwrap().clone())
    }

    fn changes_since(&self, _dir: &Path, revision: &str) -> Result<Vec<String>> {
        if !self.known_revisions.lock().unwrap().contains(revision) {
            return Err(SitescanError::InvalidReference(format!(
                "revision {revision:?} does not resolve: fatal: bad revision"
            )));
        }
        Ok(self
            .changes
            .lock()
            .unwrap()
            .get(revision)
            .cloned()
            .unwrap_or_default())
    }
}
