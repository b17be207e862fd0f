//! Merge decision over the required checks of a pull request.
use crate::checks::required::{BlockingReason, RequiredCheckSet};

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;

/// Whether a pull request may be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    /// Every required check concluded with `success`
    Merge,

    /// At least one required check did not; one reason per such check
    Blocked(Vec<BlockingReason>),
}

impl MergeDecision {
    pub fn is_merge(&self) -> bool {
        matches!(self, MergeDecision::Merge)
    }
}

/// Decides whether the pull request can be merged.
///
/// The comparison is exact: `skipped`, `neutral` and every other conclusion
/// besides `success` block the merge, as does a check that never reported.
/// An empty set is vacuously mergeable; configuration validation rejects it
/// before it gets here.
pub fn decide(required: &RequiredCheckSet) -> MergeDecision {
    let reasons = required.blocking_reasons();
    if reasons.is_empty() {
        MergeDecision::Merge
    } else {
        MergeDecision::Blocked(reasons)
    }
}
