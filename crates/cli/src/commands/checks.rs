use auto_merge_core::decision::{decide, MergeDecision};
use clap::Args;
use tracing::instrument;

use crate::commands::{create_auto_merger, report};
use crate::config::{get_config_path, AppConfig};
use crate::errors::CliError;

/// Arguments for the checks command
#[derive(Args, Debug)]
pub struct ChecksArgs {
    /// Commit whose check runs are listed
    #[arg(long)]
    pub sha: String,

    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Executes the `checks` command.
///
/// Lists the check runs of a commit and evaluates the required checks against
/// them. Nothing is opened or merged.
#[instrument]
pub async fn execute(args: ChecksArgs) -> Result<(), CliError> {
    let config_path = get_config_path(args.config.as_deref());
    let config = AppConfig::load(&config_path)?;
    config.validate()?;

    let merger = create_auto_merger(&config)?;

    let checks = merger.collect_check_runs(&args.sha).await?;
    report::print_check_runs(&args.sha, &checks);
    report::print_required_checks(&checks);

    match decide(&checks.required) {
        MergeDecision::Merge => println!("All required checks succeeded"),
        MergeDecision::Blocked(reasons) => {
            println!("A merge would be blocked:");
            for reason in &reasons {
                println!("  - {}", reason);
            }
        }
    }

    Ok(())
}
