// src/incremental/state.rs

//! Persisted key -> marker store.
//!
//! The state file is a UTF-8 JSON object mapping each key to its marker,
//! pretty-printed with 2-space indentation. Default path: `.incremental`.
//!
//! No locking is performed. Two processes racing on the same state file is an
//! accepted hazard (last write wins); callers must serialize builds or assign
//! disjoint state files.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{Result, SitescanError};
use crate::fs::FileSystem;
use crate::types::Marker;

/// Key -> marker persistence with read-merge-write semantics.
///
/// `save` must only touch the entry for its key; every other entry in the
/// backing file is preserved unchanged.
pub trait StateStore: Send + Sync + Debug {
    fn load(&self, key: &str) -> Result<Option<Marker>>;
    fn save(&mut self, key: &str, marker: &str) -> Result<()>;
}

/// JSON-file-backed store, going through the filesystem capability.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping. Missing file means "no state yet"; a present
    /// but unparsable file is corruption and aborts the run.
    fn load_map(&self) -> Result<BTreeMap<String, Marker>> {
        if !self.fs.exists(&self.path) {
            return Ok(BTreeMap::new());
        }

        let contents = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|source| SitescanError::StateCorruption {
            path: self.path.clone(),
            source,
        })
    }
}

impl StateStore for JsonStateStore {
    fn load(&self, key: &str) -> Result<Option<Marker>> {
        // Always re-read from disk; no caching across filter calls.
        let map = self.load_map()?;
        Ok(map.get(key).cloned())
    }

    fn save(&mut self, key: &str, marker: &str) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), marker.to_string());

        // serde_json pretty-printing uses 2-space indentation.
        let json = serde_json::to_string_pretty(&map)
            .map_err(|e| SitescanError::Other(e.into()))?;
        self.fs.write(&self.path, format!("{json}\n").as_bytes())?;

        debug!(path = ?self.path, key, marker, "persisted marker");
        Ok(())
    }
}

/// In-memory store for tests and embedders that manage persistence
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    entries: BTreeMap<String, Marker>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, marker: &str) -> Self {
        self.entries.insert(key.to_string(), marker.to_string());
        self
    }

    pub fn entries(&self) -> &BTreeMap<String, Marker> {
        &self.entries
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<Marker>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, marker: &str) -> Result<()> {
        self.entries.insert(key.to_string(), marker.to_string());
        Ok(())
    }
}
