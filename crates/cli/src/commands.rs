use auto_merge_core::AutoMerger;
use auto_merge_developer_platforms::github::GitHubProvider;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::CliError;

/// Check-run listing for a single commit
pub mod checks;
/// Configuration management commands
pub mod config_cmd;
/// Console output shared by the commands
pub mod report;
/// The full open, check and merge pipeline
pub mod run;

/// Creates an `AutoMerger` talking to the configured GitHub API.
///
/// The token is read from the environment variable named in the configuration.
fn create_auto_merger(config: &AppConfig) -> Result<AutoMerger<GitHubProvider>, CliError> {
    let token = config.resolve_token(|name| std::env::var(name).ok())?;

    debug!(base_url = config.api.base_url.as_str(), "Creating GitHub provider");
    let provider = GitHubProvider::new(&config.api.base_url, &token)
        .map_err(|e| CliError::ConfigError(e.to_string()))?;

    Ok(AutoMerger::new(
        provider,
        config.repository.clone(),
        config.pipeline_config(),
    ))
}
