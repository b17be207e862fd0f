use std::{
    fs,
    path::{Path, PathBuf},
};

use auto_merge_core::{
    config::{
        ChecksConfig, PipelineConfig, PollingConfig, PullRequestTemplate, RepositoryRef,
        PLACEHOLDER_OWNER,
    },
    errors::AutoMergeError,
};
use auto_merge_developer_platforms::github::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".auto-merge.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Configuration for the auto-merge CLI
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// The repository pull requests are opened against
    pub repository: RepositoryRef,

    /// Platform API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the head and base branches come from
    #[serde(default)]
    pub branches: BranchesConfig,

    /// Title and body of the pull request
    #[serde(default)]
    pub pull_request: PullRequestTemplate,

    /// Checks that gate the merge
    #[serde(default)]
    pub checks: ChecksConfig,

    /// Waiting for check runs to appear
    #[serde(default)]
    pub polling: PollingConfig,
}

impl AppConfig {
    /// Load configuration from the specified file
    pub fn load(path: &Path) -> Result<Self, AutoMergeError> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(AutoMergeError::ConfigError(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AutoMergeError::ConfigError(format!("Failed to read configuration file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            AutoMergeError::ConfigError(format!("Failed to parse configuration file: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to the specified file
    pub fn save(&self, path: &Path) -> Result<(), AutoMergeError> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self).map_err(|e| {
            AutoMergeError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AutoMergeError::ConfigError(format!("Failed to create directory: {}", e))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            AutoMergeError::ConfigError(format!("Failed to write configuration file: {}", e))
        })?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Builds the pipeline configuration handed to the core crate.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            pull_request: self.pull_request.clone(),
            checks: self.checks.clone(),
            polling: self.polling.clone(),
        }
    }

    /// Checks the values that can be verified without the environment.
    pub fn validate(&self) -> Result<(), AutoMergeError> {
        if self.repository.owner.trim().is_empty() || self.repository.name.trim().is_empty() {
            return Err(AutoMergeError::ConfigError(
                "Repository owner and name must not be empty".to_string(),
            ));
        }

        if self.api.token_env.trim().is_empty() {
            return Err(AutoMergeError::ConfigError(
                "The token environment variable name must not be empty".to_string(),
            ));
        }

        if self.branches.source == BranchSource::Fixed
            && (self.branches.head.is_none() || self.branches.base.is_none())
        {
            return Err(AutoMergeError::ConfigError(
                "Fixed branches require both 'head' and 'base'".to_string(),
            ));
        }

        self.pipeline_config().validate()
    }

    /// Resolves the head and base branches.
    ///
    /// `lookup` reads an environment variable; unset and empty values are
    /// treated the same.
    pub fn resolve_branches<F>(&self, lookup: F) -> Result<(String, String), AutoMergeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.branches.source {
            BranchSource::Environment => {
                let head = lookup_non_empty(&lookup, &self.branches.head_env);
                let base = lookup_non_empty(&lookup, &self.branches.base_env);

                match (head, base) {
                    (Some(head), Some(base)) => Ok((head, base)),
                    (head, base) => {
                        let mut missing = Vec::new();
                        if head.is_none() {
                            missing.push(format!("'{}'", self.branches.head_env));
                        }
                        if base.is_none() {
                            missing.push(format!("'{}'", self.branches.base_env));
                        }

                        Err(AutoMergeError::ConfigurationMissing(format!(
                            "environment variable(s) {} not set",
                            missing.join(", ")
                        )))
                    }
                }
            }
            BranchSource::Fixed => match (&self.branches.head, &self.branches.base) {
                (Some(head), Some(base)) => Ok((head.clone(), base.clone())),
                _ => Err(AutoMergeError::ConfigurationMissing(
                    "fixed branches require both 'head' and 'base'".to_string(),
                )),
            },
        }
    }

    /// Resolves the bearer token from the configured environment variable.
    pub fn resolve_token<F>(&self, lookup: F) -> Result<String, AutoMergeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup_non_empty(&lookup, &self.api.token_env).ok_or_else(|| {
            AutoMergeError::ConfigurationMissing(format!(
                "environment variable '{}' with the API token is not set",
                self.api.token_env
            ))
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryRef::new(PLACEHOLDER_OWNER, "your-repository"),
            api: ApiConfig::default(),
            branches: BranchesConfig::default(),
            pull_request: PullRequestTemplate::default(),
            checks: ChecksConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}

/// Platform API settings
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer token
    #[serde(default = "ApiConfig::default_token_env")]
    pub token_env: String,
}

impl ApiConfig {
    fn default_base_url() -> String {
        DEFAULT_API_URL.to_string()
    }

    fn default_token_env() -> String {
        "GITHUB_TOKEN".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ApiConfig::default_base_url(),
            token_env: ApiConfig::default_token_env(),
        }
    }
}

/// Where the branch names are read from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BranchSource {
    /// From the environment variables named in [`BranchesConfig`]
    #[default]
    Environment,

    /// From the `head` and `base` values of [`BranchesConfig`]
    Fixed,
}

/// Branch settings
#[derive(Debug, Serialize, Deserialize)]
pub struct BranchesConfig {
    #[serde(default)]
    pub source: BranchSource,

    #[serde(default = "BranchesConfig::default_head_env")]
    pub head_env: String,

    #[serde(default = "BranchesConfig::default_base_env")]
    pub base_env: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

impl BranchesConfig {
    fn default_head_env() -> String {
        "branch".to_string()
    }

    fn default_base_env() -> String {
        "originalBranch".to_string()
    }
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            source: BranchSource::default(),
            head_env: BranchesConfig::default_head_env(),
            base_env: BranchesConfig::default_base_env(),
            head: None,
            base: None,
        }
    }
}

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

fn lookup_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}
