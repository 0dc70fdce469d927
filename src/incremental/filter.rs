// src/incremental/filter.rs

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::model::{IncrementalSection, SourceSection};
use crate::discover::path_utils::rebase_onto_tracking_root;
use crate::errors::{Result, SitescanError};
use crate::fs::FileSystem;
use crate::incremental::git::{CommandGit, GitStrategy};
use crate::incremental::state::{JsonStateStore, StateStore};
use crate::incremental::strategy::{ChangeStrategy, TimeStrategy};
use crate::incremental::triggers::{Candidate, TriggerRule, TriggerSet};
use crate::types::StrategyKind;

/// Per-invocation orchestrator for incremental filtering.
///
/// Lifecycle: construct, call [`filter`](Self::filter) once before candidates
/// are consumed, then [`finalize`](Self::finalize) once after all candidates
/// have been consumed.
#[derive(Debug)]
pub struct IncrementalFilter {
    key: String,
    dir: PathBuf,
    tracking_root: PathBuf,
    triggers: TriggerSet,
    strategy: Box<dyn ChangeStrategy>,
    store: Box<dyn StateStore>,
}

impl IncrementalFilter {
    pub fn new(
        key: impl Into<String>,
        dir: impl Into<PathBuf>,
        tracking_root: impl Into<PathBuf>,
        rules: Vec<TriggerRule>,
        strategy: Box<dyn ChangeStrategy>,
        store: Box<dyn StateStore>,
    ) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(SitescanError::Validation(
                "incremental.key must be a non-empty string".to_string(),
            ));
        }

        Ok(Self {
            key,
            dir: dir.into(),
            tracking_root: tracking_root.into(),
            triggers: TriggerSet::compile(rules)?,
            strategy,
            store,
        })
    }

    /// Wire up the production parts from the validated config: the strategy
    /// named by `incremental.strategy`, the JSON state file, the real git
    /// client. For the git strategy this is the fail-fast point for
    /// environment probing.
    pub fn from_config(
        source: &SourceSection,
        inc: &IncrementalSection,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let dir = PathBuf::from(&source.dir);
        let tracking_root = match &inc.tracking_root {
            Some(root) => PathBuf::from(root),
            None => dir.clone(),
        };

        let key = match &inc.key {
            Some(key) => key.clone(),
            None => default_key(&source.dir, &source.patterns),
        };

        let mut rules: Vec<TriggerRule> = Vec::new();
        for pattern in &inc.full_rebuild {
            rules.push(TriggerRule::AllActivating {
                source: pattern.clone(),
            });
        }
        for pair in &inc.triggers {
            let [source_pat, target_pat] = &pair[..] else {
                return Err(SitescanError::Validation(format!(
                    "incremental.triggers entries must be [source, target] pairs (got {pair:?})"
                )));
            };
            rules.push(TriggerRule::SomeActivating {
                source: source_pat.clone(),
                target: target_pat.clone(),
            });
        }

        let strategy: Box<dyn ChangeStrategy> = match inc.strategy {
            StrategyKind::Time => {
                Box::new(TimeStrategy::new(fs.clone(), &tracking_root))
            }
            StrategyKind::Git => Box::new(GitStrategy::new(
                Arc::new(CommandGit::new()),
                &tracking_root,
            )?),
        };

        let store = Box::new(JsonStateStore::new(fs, &inc.file));

        Self::new(key, dir, tracking_root, rules, strategy, store)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Filter the candidate set down to the files that must be processed this
    /// run. Pure with respect to persisted state: repeatable until
    /// `finalize` writes a new marker.
    pub fn filter(&self, candidates: &[String]) -> Result<Vec<String>> {
        // Fresh read every call; nothing is cached across invocations.
        let Some(marker) = self.store.load(&self.key)? else {
            info!(key = %self.key, "no marker yet; reading everything");
            return Ok(candidates.to_vec());
        };

        let changed = self.strategy.changed_since(&marker)?;
        debug!(key = %self.key, marker = %marker, changed = changed.len(), "change set computed");

        let candidates: Vec<Candidate> = candidates
            .iter()
            .map(|raw| Candidate {
                raw: raw.clone(),
                rel: rebase_onto_tracking_root(&self.dir, &self.tracking_root, raw),
            })
            .collect();

        let kept = self.triggers.filter_candidates(&changed, &candidates)?;
        info!(
            key = %self.key,
            total = candidates.len(),
            kept = kept.len(),
            "incremental filter applied"
        );
        Ok(kept)
    }

    /// Persist the marker for the next run, merging with whatever else the
    /// state file holds. Expected once per run; a repeated call overwrites
    /// this key's entry with a possibly later value.
    pub fn finalize(&mut self) -> Result<()> {
        let marker = self.strategy.current_marker()?;
        self.store.save(&self.key, &marker)
    }
}

/// Default key when the caller does not pick one: the source directory joined
/// with the patterns, so distinct streams sharing a state file do not
/// collide.
pub fn default_key(dir: &str, patterns: &[String]) -> String {
    format!("{dir}:{}", patterns.join(","))
}
