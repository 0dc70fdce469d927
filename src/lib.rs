// src/lib.rs

pub mod cli;
pub mod config;
pub mod discover;
pub mod errors;
pub mod fs;
pub mod incremental;
pub mod logging;
pub mod read;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::discover::{collect_candidates, SourcePatterns};
use crate::fs::{FileSystem, RealFileSystem};
use crate::incremental::IncrementalFilter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - glob discovery
/// - the incremental filter (when `[incremental]` is configured)
/// - marker persistence on finalize
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let patterns = SourcePatterns::new(
        &cfg.source.patterns,
        cfg.source.ignore.as_deref(),
    )?;
    let dir = PathBuf::from(&cfg.source.dir);
    let candidates = collect_candidates(fs.as_ref(), &dir, &patterns)?;
    info!(count = candidates.len(), dir = %cfg.source.dir, "candidates discovered");

    // The filter is constructed before any filtering work so the time
    // strategy's marker reflects the start of the run.
    let mut filter = match &cfg.incremental {
        Some(inc) => Some(IncrementalFilter::from_config(&cfg.source, inc, fs.clone())?),
        None => None,
    };

    let selected = match (&filter, args.full) {
        (Some(filter), false) => filter.filter(&candidates)?,
        (Some(_), true) => {
            info!("--full: bypassing incremental filter for this run");
            candidates.clone()
        }
        (None, _) => candidates.clone(),
    };

    for path in &selected {
        println!("{path}");
    }
    info!(selected = selected.len(), total = candidates.len(), "file list emitted");

    if args.dry_run {
        debug!("dry-run: marker not persisted");
        return Ok(());
    }

    if let Some(filter) = filter.as_mut() {
        filter.finalize()?;
    }

    Ok(())
}
