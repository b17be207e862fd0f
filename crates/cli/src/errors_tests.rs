use super::*;
use auto_merge_core::errors::Operation;
use std::process::{ExitCode, Termination};

#[test]
fn test_config_error_display() {
    let err = CliError::ConfigError("bad config".to_string());
    assert_eq!(format!("{}", err), "Configuration error: bad config");
}

#[test]
fn test_network_error_display() {
    let err = CliError::NetworkError("net fail".to_string());
    assert_eq!(format!("{}", err), "Network error: net fail");
}

#[test]
fn test_merge_blocked_display() {
    let err = CliError::MergeBlocked("'build' check is missing".to_string());
    assert_eq!(format!("{}", err), "Merge blocked: 'build' check is missing");
}

#[test]
fn test_from_configuration_missing() {
    let err: CliError =
        AutoMergeError::ConfigurationMissing("environment variable 'branch' is not set".into())
            .into();

    assert!(matches!(err, CliError::ConfigError(_)));
    assert!(err.to_string().contains("'branch'"));
}

#[test]
fn test_from_request_failure_keeps_status_and_body() {
    let err: CliError = AutoMergeError::RequestFailure {
        operation: Operation::MergePullRequest,
        status: 405,
        body: "Pull Request is not mergeable".to_string(),
    }
    .into();

    assert!(matches!(err, CliError::NetworkError(_)));
    assert_eq!(
        err.to_string(),
        "Network error: Failed to merge pull request. Status: 405, response: Pull Request is not mergeable"
    );
}

#[test]
fn test_from_poll_exhausted() {
    let err: CliError = AutoMergeError::PollExhausted { attempts: 3 }.into();

    assert!(matches!(err, CliError::NetworkError(_)));
}

fn exit_code_of(err: CliError) -> String {
    format!("{:?}", err.report())
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        exit_code_of(CliError::ConfigError(String::new())),
        format!("{:?}", ExitCode::from(2))
    );
    assert_eq!(
        exit_code_of(CliError::NetworkError(String::new())),
        format!("{:?}", ExitCode::from(4))
    );
    assert_eq!(
        exit_code_of(CliError::MergeBlocked(String::new())),
        format!("{:?}", ExitCode::from(1))
    );
}
