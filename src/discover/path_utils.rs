// src/discover/path_utils.rs

//! Utility functions for path handling in discovery and filtering.

use std::path::{Component, Path, PathBuf};

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// This is intentionally robust:
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
/// - Only if both attempts fail do we give up.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    // Fast path: path already starts with our root.
    if let Ok(rel) = path.strip_prefix(root) {
        let s = rel.to_string_lossy().replace('\\', "/");
        return Some(s);
    }

    // More robust path: canonicalize both, then try again. This helps on
    // platforms (notably macOS) where different absolute prefixes may be used
    // for the same underlying directory (e.g. symlinks, /private/var/...).
    if let (Ok(root_canon), Ok(path_canon)) =
        (root.canonicalize(), path.canonicalize())
    {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            let s = rel.to_string_lossy().replace('\\', "/");
            return Some(s);
        }
    }

    None
}

/// Resolve `.` and `..` components lexically, without touching the
/// filesystem. Leading `..` components that cannot be popped are kept.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Rebase a candidate path (relative to `dir`, or absolute) onto
/// `tracking_root`, purely lexically.
///
/// Returns the forward-slash path relative to the tracking root, or `None`
/// when the candidate does not fall under it. Used to intersect candidate
/// paths with a change set whose coordinates are tracking-root-relative.
pub fn rebase_onto_tracking_root(
    dir: &Path,
    tracking_root: &Path,
    candidate: &str,
) -> Option<String> {
    let candidate_path = Path::new(candidate);
    let full = if candidate_path.is_absolute() {
        lexical_normalize(candidate_path)
    } else {
        lexical_normalize(&dir.join(candidate_path))
    };
    let root = lexical_normalize(tracking_root);

    // "." normalizes to itself but is an empty prefix for relative paths.
    let rel = if root == Path::new(".") && !full.is_absolute() {
        full.as_path()
    } else {
        full.strip_prefix(&root).ok()?
    };
    let s = rel.to_string_lossy().replace('\\', "/");
    if s.is_empty() { None } else { Some(s) }
}
