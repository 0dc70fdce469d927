use std::str::FromStr;

use serde::Deserialize;

/// Which change-detection strategy the incremental filter uses.
///
/// - `Time`: compare file modification times against a persisted timestamp.
/// - `Git`: ask git which paths changed since a persisted revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Time,
    Git,
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Time
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" => Ok(StrategyKind::Time),
            "git" => Ok(StrategyKind::Git),
            other => Err(format!(
                "invalid strategy: {other} (expected \"time\" or \"git\")"
            )),
        }
    }
}

/// A persisted checkpoint value for one key.
///
/// Opaque at this level: an RFC 3339 timestamp for the time strategy, a git
/// revision id for the git strategy.
pub type Marker = String;
