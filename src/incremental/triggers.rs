// src/incremental/triggers.rs

//! Trigger rules: declarative or programmatic mappings from a detected change
//! to additional files that must be force-included even though they did not
//! themselves change.
//!
//! Evaluation is single-pass over the change set: triggered inclusions are
//! never fed back in as new "changes" that could re-trigger further rules.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use globset::{Glob, GlobMatcher};
use tracing::debug;

use crate::errors::{Result, SitescanError};

/// Programmatic rule: sees the full changed-path list once and returns zero
/// or more extra target patterns. An empty return means "not applicable".
pub type TriggerCallback = Box<dyn Fn(&[String]) -> Vec<String> + Send + Sync>;

/// One trigger rule.
pub enum TriggerRule {
    /// Any change matching `source` forces inclusion of the entire candidate
    /// set.
    AllActivating { source: String },
    /// Any change matching `source` forces inclusion of candidates matching
    /// `target`.
    SomeActivating { source: String, target: String },
    /// Programmatic rule; decides its own applicability.
    Callback(TriggerCallback),
}

impl fmt::Debug for TriggerRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerRule::AllActivating { source } => f
                .debug_struct("AllActivating")
                .field("source", source)
                .finish(),
            TriggerRule::SomeActivating { source, target } => f
                .debug_struct("SomeActivating")
                .field("source", source)
                .field("target", target)
                .finish(),
            TriggerRule::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// One candidate path in the two coordinate spaces the engine needs.
///
/// The tracking root scopes change detection and source patterns only;
/// target patterns always see the candidate entry as discovery produced it.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The path exactly as discovery produced it; target patterns match this
    /// form and output preserves it.
    pub raw: String,
    /// The same path rebased onto the tracking root, when it falls under it.
    /// This is the coordinate space of the change set.
    pub rel: Option<String>,
}

struct CompiledPattern {
    pattern: String,
    matcher: GlobMatcher,
}

impl CompiledPattern {
    fn new(pattern: &str) -> Result<Self> {
        let matcher = compile_glob(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }
}

/// A distinct some-activating source pattern with every target pattern that
/// rules associate with it.
struct SomeRule {
    source: CompiledPattern,
    targets: Vec<String>,
}

/// Compiled, ordered trigger rule set.
pub struct TriggerSet {
    all_sources: Vec<CompiledPattern>,
    some_rules: Vec<SomeRule>,
    callbacks: Vec<TriggerCallback>,
}

impl fmt::Debug for TriggerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerSet")
            .field(
                "all_sources",
                &self
                    .all_sources
                    .iter()
                    .map(|p| p.pattern.as_str())
                    .collect::<Vec<_>>(),
            )
            .field("some_rules", &self.some_rules.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl TriggerSet {
    /// Compile an ordered rule list. Glob errors surface as validation
    /// failures naming the offending pattern.
    pub fn compile(rules: Vec<TriggerRule>) -> Result<Self> {
        let mut all_sources = Vec::new();
        let mut some_rules: Vec<SomeRule> = Vec::new();
        let mut callbacks = Vec::new();

        for rule in rules {
            match rule {
                TriggerRule::AllActivating { source } => {
                    all_sources.push(CompiledPattern::new(&source)?);
                }
                TriggerRule::SomeActivating { source, target } => {
                    // Group targets under each distinct source pattern so a
                    // source is tested against the change set once.
                    match some_rules.iter_mut().find(|r| r.source.pattern == source) {
                        Some(existing) => existing.targets.push(target),
                        None => some_rules.push(SomeRule {
                            source: CompiledPattern::new(&source)?,
                            targets: vec![target],
                        }),
                    }
                }
                TriggerRule::Callback(cb) => callbacks.push(cb),
            }
        }

        Ok(Self {
            all_sources,
            some_rules,
            callbacks,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.all_sources.is_empty() && self.some_rules.is_empty() && self.callbacks.is_empty()
    }

    /// Apply the rules: candidates that changed, plus every extra inclusion
    /// the rules demand, in the candidates' original order.
    pub fn filter_candidates(
        &self,
        changed: &BTreeSet<String>,
        candidates: &[Candidate],
    ) -> Result<Vec<String>> {
        // All-activating rules first: one hit means a full rebuild, so any
        // further per-rule work would be moot.
        for pat in &self.all_sources {
            if let Some(hit) = changed.iter().find(|c| pat.matcher.is_match(c)) {
                debug!(source = %pat.pattern, %hit, "all-activating trigger hit");
                return Ok(candidates.iter().map(|c| c.raw.clone()).collect());
            }
        }

        // Callbacks run once against the full changed list and contribute
        // unconditional target patterns.
        let changed_list: Vec<String> = changed.iter().cloned().collect();
        let mut active_targets: Vec<String> = Vec::new();
        for cb in &self.callbacks {
            active_targets.extend(cb(&changed_list));
        }

        for rule in &self.some_rules {
            if changed.iter().any(|c| rule.source.matcher.is_match(c)) {
                debug!(source = %rule.source.pattern, "some-activating trigger hit");
                active_targets.extend(rule.targets.iter().cloned());
            }
        }

        let mut include: BTreeSet<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.rel.as_deref().is_some_and(|r| changed.contains(r)))
            .map(|(i, _)| i)
            .collect();

        // Each distinct target pattern is matched against the candidate list
        // at most once, however many rules reference it.
        let mut memo: HashMap<String, BTreeSet<usize>> = HashMap::new();
        for target in active_targets {
            let matches = match memo.get(&target) {
                Some(cached) => cached.clone(),
                None => {
                    let matcher = compile_glob(&target)?;
                    let found: BTreeSet<usize> = candidates
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| matcher.is_match(c.raw.as_str()))
                        .map(|(i, _)| i)
                        .collect();
                    memo.insert(target.clone(), found.clone());
                    found
                }
            };
            include.extend(matches);
        }

        Ok(include
            .into_iter()
            .map(|i| candidates[i].raw.clone())
            .collect())
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|e| {
            SitescanError::Validation(format!(
                "trigger pattern {pattern:?} is not a valid glob: {e}"
            ))
        })
}
