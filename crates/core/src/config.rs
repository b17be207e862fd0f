//! Configuration settings for the auto-merge pipeline.
//!
//! This module centralizes the constants and the runtime configuration used
//! throughout the crate. The configuration is an explicit value built once by
//! the caller and handed to [`crate::AutoMerger`]; nothing here is global.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::AutoMergeError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Title of the merge commit created when the pull request is merged
pub const MERGE_COMMIT_TITLE: &str = "Merging PR automatically after successful checks";

/// Owner value of unconfigured setups. The head branch is sent unqualified for it.
pub const PLACEHOLDER_OWNER: &str = "your-username";

/// Default pull request title
pub const DEFAULT_PR_TITLE: &str = "Automated Merge PR";

/// Default pull request body. `{head}` and `{base}` are replaced by the branch names.
pub const DEFAULT_PR_BODY: &str =
    "This is an automated pull request to merge '{head}' into '{base}'.";

/// The repository pull requests are opened against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryRef {
    /// The owner (user or organization) of the repository
    pub owner: String,

    /// The name of the repository
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Builds the head reference sent when opening a pull request.
    ///
    /// Unless the owner is still [`PLACEHOLDER_OWNER`], the branch is qualified
    /// as `<owner>:<branch>` so pull requests from forks resolve.
    pub fn qualify_head(&self, branch: &str) -> String {
        if self.owner == PLACEHOLDER_OWNER {
            branch.to_string()
        } else {
            format!("{}:{}", self.owner, branch)
        }
    }
}

/// How the check runs of a commit are folded before evaluation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AggregationPolicy {
    /// Keep one check run per name, the last one reported
    Deduplicate,

    /// Walk the raw list once and record the conclusion of each required check
    #[default]
    Scan,
}

/// Which checks gate the merge and how they are collected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecksConfig {
    #[serde(default)]
    pub policy: AggregationPolicy,

    /// Names of the checks that must all conclude with `success`
    #[serde(default = "ChecksConfig::default_required")]
    pub required: Vec<String>,
}

impl ChecksConfig {
    fn default_required() -> Vec<String> {
        vec!["build".to_string()]
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            policy: AggregationPolicy::default(),
            required: Self::default_required(),
        }
    }
}

/// Bounded polling for check runs that have not been reported yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "PollingConfig::default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between two attempts, in seconds
    #[serde(default = "PollingConfig::default_interval_secs")]
    pub interval_secs: u64,
}

impl PollingConfig {
    fn default_max_attempts() -> u32 {
        10
    }

    fn default_interval_secs() -> u64 {
        10
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: Self::default_max_attempts(),
            interval_secs: Self::default_interval_secs(),
        }
    }
}

/// Title and body of the pull request that gets opened
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestTemplate {
    #[serde(default = "PullRequestTemplate::default_title")]
    pub title: String,

    #[serde(default = "PullRequestTemplate::default_body")]
    pub body: String,
}

impl PullRequestTemplate {
    fn default_title() -> String {
        DEFAULT_PR_TITLE.to_string()
    }

    fn default_body() -> String {
        DEFAULT_PR_BODY.to_string()
    }

    /// Renders the body for the given branches.
    pub fn render_body(&self, head_branch: &str, base_branch: &str) -> String {
        self.body
            .replace("{head}", head_branch)
            .replace("{base}", base_branch)
    }
}

impl Default for PullRequestTemplate {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            body: Self::default_body(),
        }
    }
}

/// Runtime configuration of the auto-merge pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub pull_request: PullRequestTemplate,
    pub checks: ChecksConfig,
    pub polling: PollingConfig,
}

impl PipelineConfig {
    /// Checks the configuration for values the pipeline cannot work with.
    ///
    /// An empty set of required checks would let every pull request through,
    /// so it is rejected, as are blank check names and polling without attempts.
    pub fn validate(&self) -> Result<(), AutoMergeError> {
        if self.checks.required.is_empty() {
            return Err(AutoMergeError::ConfigError(
                "At least one required check must be configured".to_string(),
            ));
        }

        if self.checks.required.iter().any(|name| name.trim().is_empty()) {
            return Err(AutoMergeError::ConfigError(
                "Required check names must not be empty".to_string(),
            ));
        }

        if self.polling.enabled && self.polling.max_attempts == 0 {
            return Err(AutoMergeError::ConfigError(
                "Polling requires at least one attempt".to_string(),
            ));
        }

        Ok(())
    }
}
