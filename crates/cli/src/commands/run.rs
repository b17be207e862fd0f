use auto_merge_core::MergeOutcome;
use clap::Args;
use tracing::{debug, info, instrument};

use crate::commands::{create_auto_merger, report};
use crate::config::{get_config_path, AppConfig};
use crate::errors::CliError;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Exit with a non-zero code when the merge is blocked by the required checks
    #[arg(long)]
    pub fail_if_not_merged: bool,
}

/// Executes the `run` command.
///
/// Opens a pull request from the head branch into the base branch, reports
/// the check runs of its head commit and merges it when every required check
/// succeeded. Branches and token are resolved before any request is sent.
#[instrument]
pub async fn execute(args: RunArgs) -> Result<(), CliError> {
    let config_path = get_config_path(args.config.as_deref());
    let config = AppConfig::load(&config_path)?;
    config.validate()?;
    debug!("Using configuration from {:?}", config_path);

    let (head_branch, base_branch) = config.resolve_branches(|name| std::env::var(name).ok())?;
    info!(
        head = head_branch.as_str(),
        base = base_branch.as_str(),
        "Resolved branches"
    );

    let merger = create_auto_merger(&config)?;

    let pull_request = merger
        .submit_pull_request(&head_branch, &base_branch)
        .await?;
    println!(
        "Pull request #{} created: {}",
        pull_request.number, pull_request.html_url
    );

    let checks = merger.collect_check_runs(&pull_request.head_sha).await?;
    report::print_check_runs(&pull_request.head_sha, &checks);
    report::print_required_checks(&checks);

    match merger.merge_if_permitted(&pull_request, &checks).await? {
        MergeOutcome::Merged(result) => {
            match result.sha {
                Some(sha) => println!(
                    "Pull request #{} merged successfully ({})",
                    pull_request.number, sha
                ),
                None => println!("Pull request #{} merged successfully", pull_request.number),
            }
            Ok(())
        }
        MergeOutcome::Blocked(reasons) => {
            println!(
                "Pull request #{} was not merged because the required checks did not all succeed:",
                pull_request.number
            );
            for reason in &reasons {
                println!("  - {}", reason);
            }

            if args.fail_if_not_merged {
                let summary: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
                return Err(CliError::MergeBlocked(summary.join("; ")));
            }

            Ok(())
        }
    }
}
