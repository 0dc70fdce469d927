// src/discover/mod.rs

//! Upstream collaborator: glob-based file discovery.
//!
//! Responsibilities:
//! - Compile include/ignore glob patterns (`patterns.rs`).
//! - Walk a directory tree through the `FileSystem` capability (`walk.rs`).
//! - Path normalization helpers shared with the incremental core
//!   (`path_utils.rs`).

pub mod path_utils;
pub mod patterns;
pub mod walk;

pub use patterns::SourcePatterns;
pub use walk::{collect_candidates, walk_files};
