// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sitescan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitescan",
    version,
    about = "Discover source files for a static-site build, optionally skipping files unchanged since the last run.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Sitescan.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Sitescan.toml")]
    pub config: String,

    /// Discover and filter, but do not persist a new marker.
    #[arg(long)]
    pub dry_run: bool,

    /// Ignore the incremental filter for this run and emit every discovered
    /// file. The marker is still advanced on finalize.
    #[arg(long)]
    pub full: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITESCAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
