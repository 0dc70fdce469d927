// src/incremental/mod.rs

//! The incremental change-detection and trigger-propagation core.
//!
//! Given a previously persisted marker and the candidate file set from
//! discovery, decide which files must be (re-)processed this run, including
//! files that did not themselves change but are declared dependents of files
//! that did.
//!
//! - `state.rs`: persisted key -> marker store (read-merge-write JSON).
//! - `strategy.rs`: the `ChangeStrategy` contract + the mtime-based strategy.
//! - `git.rs`: the `GitClient` capability and the git-based strategy.
//! - `triggers.rs`: rule compilation and single-pass trigger expansion.
//! - `filter.rs`: the orchestrator tying it all together per invocation.

pub mod filter;
pub mod git;
pub mod state;
pub mod strategy;
pub mod triggers;

pub use filter::IncrementalFilter;
pub use git::{CommandGit, GitClient, GitStrategy};
pub use state::{JsonStateStore, MemoryStateStore, StateStore};
pub use strategy::{ChangeStrategy, TimeStrategy};
pub use triggers::{TriggerRule, TriggerSet};
