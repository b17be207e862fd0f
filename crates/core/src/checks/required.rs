//! # Required Checks
//!
//! Tracks the observed state of the checks that gate a merge.
//!
//! A [`RequiredCheckSet`] starts with every tracked name marked as missing.
//! Check runs are then recorded against it; a later run with the same name
//! replaces the earlier one. The set only says "go" when every tracked name
//! ended up with exactly the `success` conclusion.

use auto_merge_developer_platforms::models::{CheckConclusion, CheckRun, CheckStatus};
use std::fmt;

#[cfg(test)]
#[path = "required_tests.rs"]
mod tests;

/// What is known about one required check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// No check run with this name was reported
    Missing,

    /// A check run with this name was reported
    Observed {
        status: CheckStatus,
        conclusion: Option<CheckConclusion>,
    },
}

impl CheckState {
    /// Returns the conclusion, if the check concluded.
    pub fn conclusion(&self) -> Option<CheckConclusion> {
        match self {
            CheckState::Missing => None,
            CheckState::Observed { conclusion, .. } => *conclusion,
        }
    }

    /// Returns `true` only for a check that concluded with `success`.
    pub fn is_successful(&self) -> bool {
        self.conclusion() == Some(CheckConclusion::Success)
    }
}

/// A tracked check name and its observed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCheck {
    pub name: String,
    pub state: CheckState,
}

/// Why a required check prevents the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockingReason {
    /// The check concluded with anything other than `success`
    Failed {
        name: String,
        conclusion: CheckConclusion,
    },

    /// The check never showed up in the check-run list
    Missing { name: String },

    /// The check was reported but has not concluded yet
    Pending { name: String, status: CheckStatus },
}

impl BlockingReason {
    /// Name of the check this reason is about.
    pub fn check_name(&self) -> &str {
        match self {
            BlockingReason::Failed { name, .. }
            | BlockingReason::Missing { name }
            | BlockingReason::Pending { name, .. } => name,
        }
    }
}

impl fmt::Display for BlockingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockingReason::Failed { name, conclusion } => {
                write!(f, "'{}' check failed (conclusion: {})", name, conclusion)
            }
            BlockingReason::Missing { name } => write!(f, "'{}' check is missing", name),
            BlockingReason::Pending { name, status } => {
                write!(f, "'{}' check has not completed (status: {})", name, status)
            }
        }
    }
}

/// The ordered set of checks that must all succeed before merging.
///
/// Names keep the order they were configured in; duplicates are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredCheckSet {
    checks: Vec<RequiredCheck>,
}

impl RequiredCheckSet {
    /// Creates a set tracking `names`, all of them missing.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut checks: Vec<RequiredCheck> = Vec::new();
        for name in names {
            let name = name.into();
            if checks.iter().any(|c| c.name == name) {
                continue;
            }

            checks.push(RequiredCheck {
                name,
                state: CheckState::Missing,
            });
        }

        Self { checks }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequiredCheck> {
        self.checks.iter()
    }

    /// Returns the state of a tracked check, `None` for untracked names.
    pub fn state(&self, name: &str) -> Option<CheckState> {
        self.checks.iter().find(|c| c.name == name).map(|c| c.state)
    }

    /// Records a check run. Returns `false` when its name is not tracked.
    ///
    /// A run recorded later overwrites whatever was recorded before for the
    /// same name.
    pub fn record(&mut self, run: &CheckRun) -> bool {
        match self.checks.iter_mut().find(|c| c.name == run.name) {
            Some(check) => {
                check.state = CheckState::Observed {
                    status: run.status,
                    conclusion: run.conclusion,
                };
                true
            }
            None => false,
        }
    }

    /// Records every run in order.
    pub fn record_all<'a>(&mut self, runs: impl IntoIterator<Item = &'a CheckRun>) {
        for run in runs {
            self.record(run);
        }
    }

    /// Returns `true` if every tracked check concluded with exactly `success`.
    pub fn all_successful(&self) -> bool {
        self.checks.iter().all(|c| c.state.is_successful())
    }

    /// Lists every tracked check that is not `success`, in configured order.
    pub fn blocking_reasons(&self) -> Vec<BlockingReason> {
        self.checks
            .iter()
            .filter_map(|check| match check.state {
                CheckState::Missing => Some(BlockingReason::Missing {
                    name: check.name.clone(),
                }),
                CheckState::Observed {
                    conclusion: Some(CheckConclusion::Success),
                    ..
                } => None,
                CheckState::Observed {
                    conclusion: Some(conclusion),
                    ..
                } => Some(BlockingReason::Failed {
                    name: check.name.clone(),
                    conclusion,
                }),
                CheckState::Observed {
                    status,
                    conclusion: None,
                } => Some(BlockingReason::Pending {
                    name: check.name.clone(),
                    status,
                }),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a RequiredCheckSet {
    type Item = &'a RequiredCheck;
    type IntoIter = std::slice::Iter<'a, RequiredCheck>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.iter()
    }
}
