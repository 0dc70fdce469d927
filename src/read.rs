// src/read.rs

//! Downstream collaborator: content reading and header decomposition.
//!
//! Header metadata (directory, base name, extension) is derived purely from
//! the path string; no filesystem metadata is consulted.

use std::path::Path;

use crate::errors::{Result, SitescanError};
use crate::fs::FileSystem;

/// One discovered file with its contents and header metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the source directory, forward slashes.
    pub path: String,
    /// Directory part of `path` ("" for top-level files).
    pub dir: String,
    /// File name without its extension.
    pub base: String,
    /// Extension without the leading dot ("" if none).
    pub ext: String,
    pub contents: String,
}

/// Read one discovered file. `encoding` comes from the validated config;
/// only UTF-8 is supported.
pub fn read_source(
    fs: &dyn FileSystem,
    root: &Path,
    rel_path: &str,
    encoding: &str,
) -> Result<SourceFile> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" => {}
        other => {
            return Err(SitescanError::Validation(format!(
                "source.encoding: unsupported encoding {other:?} (only \"utf-8\" is supported)"
            )));
        }
    }

    let contents = fs.read_to_string(&root.join(rel_path))?;
    let (dir, base, ext) = split_path(rel_path);

    Ok(SourceFile {
        path: rel_path.to_string(),
        dir,
        base,
        ext,
        contents,
    })
}

/// Decompose a forward-slash path into (directory, base name, extension).
///
/// A leading dot alone does not make an extension: `".gitignore"` has base
/// `".gitignore"` and no extension.
pub fn split_path(rel_path: &str) -> (String, String, String) {
    let (dir, name) = match rel_path.rfind('/') {
        Some(i) => (&rel_path[..i], &rel_path[i + 1..]),
        None => ("", rel_path),
    };

    let (base, ext) = match name.rfind('.') {
        Some(i) if i > 0 => (&name[..i], &name[i + 1..]),
        _ => (name, ""),
    };

    (dir.to_string(), base.to_string(), ext.to_string())
}
