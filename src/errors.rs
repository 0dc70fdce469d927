// src/errors.rs

//! Crate-wide error taxonomy and `Result` alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitescanError {
    /// Malformed construction options or config values. The message names the
    /// offending option.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The git binary is unavailable, or the tracking root is not inside a
    /// repository, while the git strategy was requested.
    #[error("Environment error: {0}")]
    Environment(String),

    /// A persisted marker that the active strategy cannot resolve (unknown
    /// git revision, unparsable timestamp). Never downgraded to "everything
    /// changed" or "nothing changed".
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The state file exists but is not valid JSON.
    #[error("State file {path:?} is corrupt: {source}")]
    StateCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SitescanError>;
