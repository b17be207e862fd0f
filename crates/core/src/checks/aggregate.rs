//! # Check Aggregation
//!
//! Folds the check runs of a commit into a [`RequiredCheckSet`].
//!
//! Two policies are supported. `Deduplicate` keeps one run per name (the last
//! one reported) and exposes that unique list. `Scan` records every run in
//! order against the required set and exposes the raw list unchanged. Both
//! leave the required set in the same state for the same input.

use auto_merge_developer_platforms::models::CheckRun;
use tracing::debug;

use crate::checks::required::RequiredCheckSet;
use crate::config::AggregationPolicy;

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;

/// The outcome of listing the check runs of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckRunListing {
    /// The platform reported no check run at all
    NoChecksFound,

    /// The check runs as reported, duplicates included
    Found(Vec<CheckRun>),
}

impl CheckRunListing {
    /// Wraps a list of runs, mapping an empty list to [`CheckRunListing::NoChecksFound`].
    pub fn from_runs(runs: Vec<CheckRun>) -> Self {
        if runs.is_empty() {
            CheckRunListing::NoChecksFound
        } else {
            CheckRunListing::Found(runs)
        }
    }

    pub fn runs(&self) -> &[CheckRun] {
        match self {
            CheckRunListing::NoChecksFound => &[],
            CheckRunListing::Found(runs) => runs,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CheckRunListing::NoChecksFound)
    }
}

/// Check runs after aggregation, together with the resulting required set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedChecks {
    /// The policy that produced this aggregation
    pub policy: AggregationPolicy,

    /// The unique runs for `Deduplicate`, the raw runs for `Scan`
    pub check_runs: Vec<CheckRun>,

    /// The state of every required check
    pub required: RequiredCheckSet,

    /// `true` when the platform reported no check run at all
    pub no_checks_found: bool,
}

/// Keeps one run per name.
///
/// The run kept for a name is the last one in `runs`, while the position of
/// the name in the result is where it first appeared.
pub fn deduplicate_by_name(runs: &[CheckRun]) -> Vec<CheckRun> {
    let mut unique: Vec<CheckRun> = Vec::new();
    for run in runs {
        match unique.iter_mut().find(|existing| existing.name == run.name) {
            Some(existing) => *existing = run.clone(),
            None => unique.push(run.clone()),
        }
    }

    unique
}

/// Aggregates `listing` against the `tracked` check names using `policy`.
pub fn aggregate(
    policy: AggregationPolicy,
    listing: &CheckRunListing,
    tracked: &[String],
) -> AggregatedChecks {
    let mut required = RequiredCheckSet::new(tracked.iter().cloned());

    let check_runs = match policy {
        AggregationPolicy::Deduplicate => {
            let unique = deduplicate_by_name(listing.runs());
            debug!(
                reported = listing.runs().len(),
                unique = unique.len(),
                "Deduplicated check runs by name"
            );
            required.record_all(&unique);
            unique
        }
        AggregationPolicy::Scan => {
            let raw = listing.runs().to_vec();
            required.record_all(&raw);
            raw
        }
    };

    AggregatedChecks {
        policy,
        check_runs,
        required,
        no_checks_found: listing.is_empty(),
    }
}
