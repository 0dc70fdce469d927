// src/discover/walk.rs

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::discover::path_utils::relative_str;
use crate::discover::patterns::SourcePatterns;
use crate::fs::FileSystem;

/// Collect every file under `root`, depth-first, through the filesystem
/// capability. Returns full paths in no particular order.
pub fn walk_files(fs: &dyn FileSystem, root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Resolve the candidate set for one source directory: every file under
/// `dir` matching the include patterns and not the ignore pattern.
///
/// Paths come back relative to `dir`, forward-slash separated, sorted for
/// deterministic output across platforms.
pub fn collect_candidates(
    fs: &dyn FileSystem,
    dir: &Path,
    patterns: &SourcePatterns,
) -> Result<Vec<String>> {
    let mut candidates = Vec::new();

    for path in walk_files(fs, dir)? {
        if let Some(rel) = relative_str(dir, &path) {
            if patterns.matches(&rel) {
                candidates.push(rel);
            }
        }
    }

    candidates.sort();
    Ok(candidates)
}
