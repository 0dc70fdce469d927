// src/discover/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled include/ignore glob patterns for one source directory.
///
/// Patterns are relative to the source directory. Discovery passes relative
/// paths (e.g. `"posts/2024/intro.md"`) into `matches`.
#[derive(Clone)]
pub struct SourcePatterns {
    include_set: GlobSet,
    ignore_set: Option<GlobSet>,
}

impl fmt::Debug for SourcePatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcePatterns").finish_non_exhaustive()
    }
}

impl SourcePatterns {
    /// Compile include patterns plus an optional ignore pattern.
    pub fn new(include: &[String], ignore: Option<&str>) -> Result<Self> {
        let include_set =
            build_globset(include).context("building include globset")?;

        let ignore_set = match ignore {
            Some(pat) => {
                let set = build_globset(std::slice::from_ref(&pat.to_string()))
                    .context("building ignore globset")?;
                Some(set)
            }
            None => None,
        };

        Ok(Self {
            include_set,
            ignore_set,
        })
    }

    /// Returns true if a path (relative to the source directory, forward
    /// slashes) should be part of the candidate set.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.include_set.is_match(rel_path) {
            return false;
        }
        if let Some(ignore) = &self.ignore_set {
            if ignore.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
