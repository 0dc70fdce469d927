// src/incremental/strategy.rs

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::discover::path_utils::relative_str;
use crate::discover::walk::walk_files;
use crate::errors::{Result, SitescanError};
use crate::fs::FileSystem;
use crate::types::Marker;

/// One way of answering "which paths under the tracking root changed since
/// this marker?". The tracking root is bound at construction.
pub trait ChangeStrategy: Send + Sync + Debug {
    /// Paths changed since `marker`, forward-slash, relative to the tracking
    /// root.
    fn changed_since(&self, marker: &str) -> Result<BTreeSet<String>>;

    /// The marker to persist for the *next* run.
    fn current_marker(&self) -> Result<Marker>;
}

/// Modification-time-based strategy.
///
/// The reference instant is captured when the strategy is constructed, i.e.
/// before any filtering work happens. Files modified between construction and
/// finalize land strictly after the persisted marker and are picked up by the
/// next cycle instead of being lost.
#[derive(Debug, Clone)]
pub struct TimeStrategy {
    fs: Arc<dyn FileSystem>,
    tracking_root: PathBuf,
    started_at: DateTime<Utc>,
}

impl TimeStrategy {
    pub fn new(fs: Arc<dyn FileSystem>, tracking_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            tracking_root: tracking_root.into(),
            started_at: Utc::now(),
        }
    }

    /// Override the construction instant. Test hook.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }
}

impl ChangeStrategy for TimeStrategy {
    fn changed_since(&self, marker: &str) -> Result<BTreeSet<String>> {
        let cutoff = DateTime::parse_from_rfc3339(marker)
            .map_err(|e| {
                SitescanError::InvalidReference(format!(
                    "marker {marker:?} is not an RFC 3339 timestamp: {e}"
                ))
            })?
            .with_timezone(&Utc);

        let mut changed = BTreeSet::new();
        for path in walk_files(self.fs.as_ref(), &self.tracking_root)? {
            let mtime: DateTime<Utc> = self.fs.modified(&path)?.into();
            // Strictly greater than. Granularity below one second is
            // filesystem-dependent; whole seconds are the guaranteed floor.
            if mtime > cutoff {
                if let Some(rel) = relative_str(&self.tracking_root, &path) {
                    changed.insert(rel);
                }
            }
        }

        debug!(
            cutoff = %cutoff,
            count = changed.len(),
            "mtime scan under {:?}",
            self.tracking_root
        );
        Ok(changed)
    }

    fn current_marker(&self) -> Result<Marker> {
        Ok(self.started_at.to_rfc3339())
    }
}
