use clap::Subcommand;
use tracing::debug;

use auto_merge_core::config::AggregationPolicy;

use crate::config::{get_config_path, AppConfig, BranchSource};
use crate::errors::CliError;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create initial configuration file
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check configuration syntax and values
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show current configuration
    Show {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },
}

/// Execute the config command
pub async fn execute(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Init { path } => init_config(path.as_deref()),
        ConfigCommands::Validate { path } => validate_config(path.as_deref()),
        ConfigCommands::Show { path } => show_config(path.as_deref()),
    }
}

/// Initialize a new configuration file
fn init_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Initializing configuration at {:?}", config_path);

    if config_path.exists() {
        return Err(CliError::ConfigError(format!(
            "Configuration file already exists at {:?}",
            config_path
        )));
    }

    let config = AppConfig::default();
    config.save(&config_path)?;

    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Validate a configuration file
fn validate_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Validating configuration at {:?}", config_path);

    let config = AppConfig::load(&config_path)?;
    config.validate()?;

    println!("Configuration is valid");
    Ok(())
}

/// Print the pipeline a configuration file resolves to
fn show_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Showing configuration from {:?}", config_path);

    let config = AppConfig::load(&config_path)?;
    println!("Configuration from {:?}:", config_path);
    print!("{}", describe_pipeline(&config));

    Ok(())
}

/// Renders the settings a run would use once every default is applied.
pub fn describe_pipeline(config: &AppConfig) -> String {
    let pipeline = config.pipeline_config();
    let mut lines = vec![
        format!(
            "Repository: {}/{}",
            config.repository.owner, config.repository.name
        ),
        format!(
            "API: {} (token from ${})",
            config.api.base_url, config.api.token_env
        ),
    ];

    lines.push(match config.branches.source {
        BranchSource::Environment => format!(
            "Branches: head from ${}, base from ${}",
            config.branches.head_env, config.branches.base_env
        ),
        BranchSource::Fixed => format!(
            "Branches: head '{}', base '{}'",
            config.branches.head.as_deref().unwrap_or_default(),
            config.branches.base.as_deref().unwrap_or_default()
        ),
    });

    lines.push(format!("Pull request title: {}", pipeline.pull_request.title));

    let policy = match pipeline.checks.policy {
        AggregationPolicy::Deduplicate => "deduplicate",
        AggregationPolicy::Scan => "scan",
    };
    lines.push(format!("Aggregation policy: {}", policy));

    if pipeline.checks.required.is_empty() {
        lines.push("Required checks: none".to_string());
    } else {
        lines.push("Required checks:".to_string());
        for name in &pipeline.checks.required {
            lines.push(format!("  - {}", name));
        }
    }

    let polling = &pipeline.polling;
    lines.push(if polling.enabled {
        format!(
            "Polling: up to {} attempts, {}s apart",
            polling.max_attempts, polling.interval_secs
        )
    } else {
        "Polling: disabled".to_string()
    });

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
