// src/config/model.rs

use serde::Deserialize;

use crate::types::StrategyKind;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [source]
/// dir = "content"
/// patterns = ["**/*.md"]
/// ignore = "**/_drafts/**"
///
/// [incremental]
/// strategy = "time"
/// full_rebuild = ["sitescan.*"]
/// triggers = [["**/_includes/**", "**/*.md"]]
/// ```
///
/// The `[incremental]` section is optional; without it every run reads the
/// full candidate set.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Where and what to discover, from `[source]`.
    pub source: SourceSection,

    /// Incremental filtering options from `[incremental]`, if any.
    #[serde(default)]
    pub incremental: Option<IncrementalSection>,
}

/// `[source]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    /// Directory to discover files in.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Include glob patterns, relative to `dir`. Must not be empty.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Optional ignore glob pattern.
    #[serde(default)]
    pub ignore: Option<String>,

    /// Text encoding for content reads. Only `"utf-8"` is supported.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_dir() -> String {
    ".".to_string()
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            patterns: Vec::new(),
            ignore: None,
            encoding: default_encoding(),
        }
    }
}

/// `[incremental]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct IncrementalSection {
    /// Identifies one independent incremental stream. Derived from
    /// `dir` + `patterns` when absent.
    #[serde(default)]
    pub key: Option<String>,

    /// Path of the persisted state file.
    #[serde(default = "default_state_file")]
    pub file: String,

    /// `"time"` or `"git"`. Strongly typed, so an unknown value fails during
    /// deserialization.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Directory scope for change detection and trigger source patterns.
    /// Defaults to `source.dir`.
    #[serde(default)]
    pub tracking_root: Option<String>,

    /// All-activating source patterns: any matching change forces a full
    /// rebuild.
    #[serde(default)]
    pub full_rebuild: Vec<String>,

    /// Some-activating `[source, target]` pattern pairs.
    #[serde(default)]
    pub triggers: Vec<Vec<String>>,
}

fn default_state_file() -> String {
    ".incremental".to_string()
}

impl Default for IncrementalSection {
    fn default() -> Self {
        Self {
            key: None,
            file: default_state_file(),
            strategy: StrategyKind::default(),
            tracking_root: None,
            full_rebuild: Vec::new(),
            triggers: Vec::new(),
        }
    }
}

/// Validated configuration.
///
/// Construct via `TryFrom<RawConfigFile>` (see `validate.rs`) so that every
/// instance in the rest of the program has passed shape validation.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub source: SourceSection,
    pub incremental: Option<IncrementalSection>,
}

impl ConfigFile {
    /// Construct without validation. Only `validate.rs` and tests that build
    /// known-good configs should call this.
    pub fn new_unchecked(
        source: SourceSection,
        incremental: Option<IncrementalSection>,
    ) -> Self {
        Self {
            source,
            incremental,
        }
    }
}
