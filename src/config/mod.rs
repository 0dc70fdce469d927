// src/config/mod.rs

//! Configuration loading and validation for sitescan.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate option shapes like trigger pairs and glob syntax (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, IncrementalSection, RawConfigFile, SourceSection};
pub use validate::validate_raw_config;
