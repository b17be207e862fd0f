//! # Auto Merge CLI
//!
//! Command-line interface for opening a pull request and merging it once its
//! required checks have succeeded.
//!
//! # Commands
//!
//! - `run` - Open a pull request, inspect its checks and merge it if they all succeeded
//! - `checks` - List and evaluate the check runs of a commit
//! - `config` - Manage configuration files
//!
//! # Examples
//!
//! ```bash
//! # Open and merge a pull request from $branch into $originalBranch
//! auto-merge run
//!
//! # Inspect the checks of a commit
//! auto-merge checks --sha 6dcb09b5b57875f334f61aebed695e2e4193db5e
//!
//! # Initialize configuration
//! auto-merge config init
//! ```

#![deny(missing_docs)]

use clap::{Parser, Subcommand};
use std::process::{ExitCode, Termination};
use tracing::{error, info};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::{checks::ChecksArgs, config_cmd::ConfigCommands, run::RunArgs};
use errors::CliError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
const LOG_FILTER_ENV: &str = "AUTO_MERGE_LOG";

/// Command-line interface structure for auto-merge.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the auto-merge CLI.
#[derive(Subcommand)]
enum Commands {
    /// Open a pull request and merge it once the required checks succeeded
    Run(RunArgs),

    /// List the check runs of a commit and evaluate the required checks
    Checks(ChecksArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Installs the tracing subscriber.
///
/// `AUTO_MERGE_LOG` takes precedence. Without it, only warnings are shown, or
/// debug output when `--verbose` is set. Diagnostics go to stderr so they do
/// not mix with the command output.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Dispatches to the command handler.
async fn execute(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run(args) => commands::run::execute(args).await.inspect_err(|e| {
            error!("Error running the auto-merge pipeline: {}", e);
        }),
        Commands::Checks(args) => commands::checks::execute(args).await.inspect_err(|e| {
            error!("Error listing check runs: {}", e);
        }),
        Commands::Config(cmd) => commands::config_cmd::execute(cmd).await.inspect_err(|e| {
            error!("Error executing config command: {}", e);
        }),
    }
}

/// Main entry point for the auto-merge CLI.
///
/// Exit codes: `0` on success (including a blocked merge unless
/// `--fail-if-not-merged` is given), `1` for a blocked merge with that flag,
/// `2` for configuration errors and `4` for failed platform requests.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match execute(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.report()
        }
    }
}
