use auto_merge_core::errors::AutoMergeError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error, including missing branch or token settings
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A platform request failed or never produced check runs
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The merge was blocked and the caller asked for a failing exit code
    #[error("Merge blocked: {0}")]
    MergeBlocked(String),
}

impl From<AutoMergeError> for CliError {
    fn from(err: AutoMergeError) -> Self {
        match err {
            AutoMergeError::ConfigError(_) | AutoMergeError::ConfigurationMissing(_) => {
                CliError::ConfigError(err.to_string())
            }
            AutoMergeError::GitProviderError { .. }
            | AutoMergeError::PollExhausted { .. }
            | AutoMergeError::RequestFailure { .. } => CliError::NetworkError(err.to_string()),
        }
    }
}

impl std::process::Termination for CliError {
    fn report(self) -> std::process::ExitCode {
        match self {
            CliError::ConfigError(_) => std::process::ExitCode::from(2),
            CliError::NetworkError(_) => std::process::ExitCode::from(4),
            CliError::MergeBlocked(_) => std::process::ExitCode::from(1),
        }
    }
}
