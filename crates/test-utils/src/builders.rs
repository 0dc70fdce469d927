#![allow(dead_code)]

use std::collections::BTreeSet;

use sitescan::config::{ConfigFile, IncrementalSection, RawConfigFile, SourceSection};
use sitescan::errors::Result;
use sitescan::incremental::ChangeStrategy;
use sitescan::types::Marker;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                source: SourceSection {
                    patterns: vec!["**/*".to_string()],
                    ..SourceSection::default()
                },
                incremental: None,
            },
        }
    }

    pub fn with_dir(mut self, dir: &str) -> Self {
        self.config.source.dir = dir.to_string();
        self
    }

    pub fn with_patterns(mut self, patterns: &[&str]) -> Self {
        self.config.source.patterns = patterns.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_ignore(mut self, pattern: &str) -> Self {
        self.config.source.ignore = Some(pattern.to_string());
        self
    }

    pub fn with_incremental(mut self, inc: IncrementalSection) -> Self {
        self.config.incremental = Some(inc);
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `IncrementalSection`.
pub struct IncrementalSectionBuilder {
    section: IncrementalSection,
}

impl IncrementalSectionBuilder {
    pub fn new() -> Self {
        Self {
            section: IncrementalSection::default(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.section.key = Some(key.to_string());
        self
    }

    pub fn with_file(mut self, file: &str) -> Self {
        self.section.file = file.to_string();
        self
    }

    pub fn with_tracking_root(mut self, root: &str) -> Self {
        self.section.tracking_root = Some(root.to_string());
        self
    }

    pub fn with_full_rebuild(mut self, pattern: &str) -> Self {
        self.section.full_rebuild.push(pattern.to_string());
        self
    }

    pub fn with_trigger(mut self, source: &str, target: &str) -> Self {
        self.section
            .triggers
            .push(vec![source.to_string(), target.to_string()]);
        self
    }

    pub fn build(self) -> IncrementalSection {
        self.section
    }
}

impl Default for IncrementalSectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strategy stub returning a fixed change set and marker, for orchestrator
/// and trigger tests that do not care where changes come from.
#[derive(Debug, Clone)]
pub struct StubStrategy {
    pub changed: BTreeSet<String>,
    pub marker: String,
}

impl StubStrategy {
    pub fn new(changed: &[&str], marker: &str) -> Self {
        Self {
            changed: changed.iter().map(|s| s.to_string()).collect(),
            marker: marker.to_string(),
        }
    }
}

impl ChangeStrategy for StubStrategy {
    fn changed_since(&self, _marker: &str) -> Result<BTreeSet<String>> {
        Ok(self.changed.clone())
    }

    fn current_marker(&self) -> Result<Marker> {
        Ok(self.marker.clone())
    }
}
