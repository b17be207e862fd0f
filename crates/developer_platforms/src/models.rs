//! # Models
//!
//! This module contains the data models exchanged with developer platforms.
//!
//! They describe the handful of entities the auto-merge pipeline works with:
//! the pull request it opens, the check runs reported for the pull request's
//! head commit, and the result of merging. All of them are serializable so
//! they can be read from and written to the platform APIs directly.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Outcome of a completed check run.
///
/// Values follow the GitHub check run API. Conclusions the API may add in the
/// future deserialize to [`CheckConclusion::Unknown`] instead of failing the
/// whole check-run listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// The check requires an action from a person before it can complete
    ActionRequired,
    /// The check was cancelled
    Cancelled,
    /// The check failed
    Failure,
    /// The check completed without a pass or fail verdict
    Neutral,
    /// The check was skipped
    Skipped,
    /// The check was marked stale by the platform
    Stale,
    /// The check could not start
    StartupFailure,
    /// The check passed
    Success,
    /// The check ran out of time
    TimedOut,
    /// A conclusion this crate does not know about
    #[serde(other)]
    Unknown,
}

impl CheckConclusion {
    /// Returns the wire representation of the conclusion.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckConclusion::ActionRequired => "action_required",
            CheckConclusion::Cancelled => "cancelled",
            CheckConclusion::Failure => "failure",
            CheckConclusion::Neutral => "neutral",
            CheckConclusion::Skipped => "skipped",
            CheckConclusion::Stale => "stale",
            CheckConclusion::StartupFailure => "startup_failure",
            CheckConclusion::Success => "success",
            CheckConclusion::TimedOut => "timed_out",
            CheckConclusion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CheckConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check finished and carries a conclusion
    Completed,
    /// The check is running
    InProgress,
    /// The check is waiting for a runner to pick it up
    Pending,
    /// The check is queued
    Queued,
    /// The check has been requested but not queued yet
    Requested,
    /// The check waits for a deployment protection rule
    Waiting,
    /// A status this crate does not know about
    #[serde(other)]
    Unknown,
}

impl CheckStatus {
    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Completed => "completed",
            CheckStatus::InProgress => "in_progress",
            CheckStatus::Pending => "pending",
            CheckStatus::Queued => "queued",
            CheckStatus::Requested => "requested",
            CheckStatus::Waiting => "waiting",
            CheckStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named result of an automated verification attached to a commit.
///
/// Several check runs can share a name when a check is re-run.
///
/// # Examples
///
/// ```
/// use auto_merge_developer_platforms::models::{CheckConclusion, CheckRun, CheckStatus};
///
/// let run = CheckRun {
///     name: "build".to_string(),
///     status: CheckStatus::Completed,
///     conclusion: Some(CheckConclusion::Success),
/// };
/// assert_eq!(run.to_string(), "build (completed) - Conclusion: success");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// The name of the check
    pub name: String,

    /// The lifecycle stage of the check
    pub status: CheckStatus,

    /// The outcome of the check, present once the check completed
    #[serde(default)]
    pub conclusion: Option<CheckConclusion>,
}

impl fmt::Display for CheckRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conclusion = self.conclusion.map_or("none", |c| c.as_str());
        write!(
            f,
            "{} ({}) - Conclusion: {}",
            self.name, self.status, conclusion
        )
    }
}

/// Strategy used to integrate a pull request into its base branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    Merge,
    /// Rebase the commits onto the base branch
    Rebase,
    /// Squash all commits into one
    Squash,
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            MergeMethod::Merge => "merge",
            MergeMethod::Rebase => "rebase",
            MergeMethod::Squash => "squash",
        };
        f.write_str(value)
    }
}

/// Result reported by the platform after a merge request was accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Whether the pull request was merged
    #[serde(default)]
    pub merged: bool,

    /// The SHA of the merge commit, if any
    #[serde(default)]
    pub sha: Option<String>,

    /// A human readable message from the platform
    #[serde(default)]
    pub message: Option<String>,
}

/// The data needed to open a pull request.
///
/// `head` is sent as given. Qualifying it with the owner for cross-fork pull
/// requests is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPullRequest {
    /// The title of the pull request
    pub title: String,

    /// The description of the pull request
    pub body: String,

    /// The branch that contains the changes
    pub head: String,

    /// The branch the changes should be merged into
    pub base: String,
}

/// Represents a pull request opened on a Git provider.
///
/// # Examples
///
/// ```
/// use auto_merge_developer_platforms::models::PullRequest;
///
/// let pr = PullRequest {
///     number: 55,
///     html_url: "https://github.com/krkredde/gauto/pull/55".to_string(),
///     head_sha: "6dcb09b5b57875f334f61aebed695e2e4193db5e".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number
    pub number: u64,

    /// The web address of the pull request
    pub html_url: String,

    /// The commit at the tip of the head branch
    pub head_sha: String,
}
