//! Candidate ranking and primary selection.

use serde::{Deserialize, Serialize};

use crate::quality::Reliability;
use crate::strategy::{Literal, LocatorCandidate, StrategyType};

/// Candidates ordered by priority, with the winner split out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// Lowest priority number
    pub primary: LocatorCandidate,
    /// All candidates, ascending priority (primary included)
    pub alternatives: Vec<LocatorCandidate>,
}

/// Order candidates by priority and elect the first.
///
/// Priorities are distinct per strategy, so the order is total. Returns
/// `None` only for an empty input; the full pipeline never produces one
/// because the CSS strategy always succeeds.
#[must_use]
pub fn rank(mut candidates: Vec<LocatorCandidate>) -> Option<Ranking> {
    candidates.sort_by_key(|c| c.priority);
    let primary = candidates.first()?.clone();
    Some(Ranking {
        primary,
        alternatives: candidates,
    })
}

/// Synthesis result for one descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorSet {
    /// Elected locator
    pub primary: LocatorCandidate,
    /// All successful candidates, ascending priority
    pub alternatives: Vec<LocatorCandidate>,
    /// Heuristic weight of the CSS fallback
    pub specificity: u32,
    /// Coarse reliability class
    pub reliability: Reliability,
    /// Full CSS ancestor path (may be empty for `<body>`)
    pub css_path: String,
    /// XPath, escaped for emission (may be empty for `<body>`)
    pub xpath: Literal,
}

impl LocatorSet {
    /// Candidate produced by one strategy, if it succeeded
    #[must_use]
    pub fn candidate(&self, strategy: StrategyType) -> Option<&LocatorCandidate> {
        self.alternatives
            .iter()
            .find(|c| c.strategy_type == strategy)
    }

    /// The CSS fallback candidate (always present)
    #[must_use]
    pub fn css(&self) -> Option<&LocatorCandidate> {
        self.candidate(StrategyType::Css)
    }

    /// Strategies that succeeded, ascending priority
    #[must_use]
    pub fn strategies(&self) -> Vec<StrategyType> {
        self.alternatives.iter().map(|c| c.strategy_type).collect()
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_json(&self) -> crate::PinpointResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
