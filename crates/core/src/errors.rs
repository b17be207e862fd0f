use auto_merge_developer_platforms::errors::Error as ProviderError;
use std::fmt;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// The platform call a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Opening the pull request
    CreatePullRequest,
    /// Listing the check runs of the head commit
    ListCheckRuns,
    /// Merging the pull request
    MergePullRequest,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Operation::CreatePullRequest => "create pull request",
            Operation::ListCheckRuns => "list check runs",
            Operation::MergePullRequest => "merge pull request",
        };
        f.write_str(value)
    }
}

#[derive(Error, Debug)]
pub enum AutoMergeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Failed to {operation}: {message}")]
    GitProviderError {
        operation: Operation,
        message: String,
    },

    #[error("No check runs appeared after {attempts} attempt(s)")]
    PollExhausted { attempts: u32 },

    #[error("Failed to {operation}. Status: {status}, response: {body}")]
    RequestFailure {
        operation: Operation,
        status: u16,
        body: String,
    },
}

impl AutoMergeError {
    /// Wraps an error reported by the developer platform for `operation`.
    pub fn from_provider(operation: Operation, error: ProviderError) -> Self {
        match error {
            ProviderError::RequestFailure { status, body } => AutoMergeError::RequestFailure {
                operation,
                status,
                body,
            },
            other => AutoMergeError::GitProviderError {
                operation,
                message: other.to_string(),
            },
        }
    }
}
