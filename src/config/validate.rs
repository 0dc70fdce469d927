// src/config/validate.rs

use globset::Glob;

use crate::config::model::{ConfigFile, IncrementalSection, RawConfigFile, SourceSection};
use crate::errors::{Result, SitescanError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SitescanError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.source, raw.incremental))
    }
}

pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_source(&cfg.source)?;
    if let Some(inc) = &cfg.incremental {
        validate_incremental(inc)?;
    }
    Ok(())
}

fn validate_source(source: &SourceSection) -> Result<()> {
    if source.patterns.is_empty() {
        return Err(SitescanError::Validation(
            "source.patterns must contain at least one glob pattern".to_string(),
        ));
    }
    for pat in &source.patterns {
        check_glob("source.patterns", pat)?;
    }
    if let Some(ignore) = &source.ignore {
        check_glob("source.ignore", ignore)?;
    }

    match source.encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" => {}
        other => {
            return Err(SitescanError::Validation(format!(
                "source.encoding: unsupported encoding {other:?} (only \"utf-8\" is supported)"
            )));
        }
    }

    Ok(())
}

fn validate_incremental(inc: &IncrementalSection) -> Result<()> {
    if let Some(key) = &inc.key {
        if key.trim().is_empty() {
            return Err(SitescanError::Validation(
                "incremental.key must be a non-empty string".to_string(),
            ));
        }
    }

    if inc.file.trim().is_empty() {
        return Err(SitescanError::Validation(
            "incremental.file must be a non-empty path".to_string(),
        ));
    }

    if let Some(root) = &inc.tracking_root {
        if root.trim().is_empty() {
            return Err(SitescanError::Validation(
                "incremental.tracking_root must be a non-empty path".to_string(),
            ));
        }
    }

    for pat in &inc.full_rebuild {
        check_glob("incremental.full_rebuild", pat)?;
    }

    for (i, pair) in inc.triggers.iter().enumerate() {
        if pair.len() != 2 {
            return Err(SitescanError::Validation(format!(
                "incremental.triggers[{i}] must be a [source, target] pair (got {} element(s))",
                pair.len()
            )));
        }
        for pat in pair {
            check_glob("incremental.triggers", pat)?;
        }
    }

    Ok(())
}

fn check_glob(option: &str, pattern: &str) -> Result<()> {
    Glob::new(pattern).map(|_| ()).map_err(|e| {
        SitescanError::Validation(format!(
            "{option}: invalid glob pattern {pattern:?}: {e}"
        ))
    })
}
