//! # Auto Merge Core
//!
//! Core logic for opening a pull request and merging it once its required
//! checks have succeeded.
//!
//! The pipeline runs three platform calls strictly in order:
//! - open a pull request from a head branch into a base branch
//! - list the check runs of the pull request's head commit
//! - merge the pull request, only if every required check concluded with `success`
//!
//! Any failed call halts the remaining stages. Nothing is retried.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use auto_merge_core::config::{PipelineConfig, RepositoryRef};
//! use auto_merge_core::{AutoMerger, MergeOutcome};
//! use auto_merge_developer_platforms::github::GitHubProvider;
//!
//! async fn merge_branch(token: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GitHubProvider::new("https://api.github.com", token)?;
//!     let repository = RepositoryRef::new("krkredde", "gauto");
//!     let merger = AutoMerger::new(provider, repository, PipelineConfig::default());
//!
//!     let report = merger.run("auto_merge", "main").await?;
//!     match report.outcome {
//!         MergeOutcome::Merged(_) => println!("Merged {}", report.pull_request.html_url),
//!         MergeOutcome::Blocked(reasons) => {
//!             for reason in reasons {
//!                 println!("{}", reason);
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

use auto_merge_developer_platforms::models::{
    MergeMethod, MergeResult, NewPullRequest, PullRequest,
};
use auto_merge_developer_platforms::PullRequestProvider;
use tracing::{debug, error, info, instrument, warn};

pub mod checks;
use checks::aggregate::{aggregate, AggregatedChecks};
use checks::required::BlockingReason;

pub mod config;
use config::{PipelineConfig, RepositoryRef, MERGE_COMMIT_TITLE};

pub mod decision;
use decision::{decide, MergeDecision};

pub mod errors;
use errors::{AutoMergeError, Operation};

pub mod polling;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// What happened at the merge stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The pull request was merged
    Merged(MergeResult),

    /// The merge was not attempted; one reason per required check that is not `success`
    Blocked(Vec<BlockingReason>),
}

impl MergeOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, MergeOutcome::Merged(_))
    }
}

/// Everything a full pipeline run produced.
#[derive(Debug, Clone)]
pub struct AutoMergeReport {
    /// The pull request that was opened
    pub pull_request: PullRequest,

    /// The check runs of the head commit after aggregation
    pub checks: AggregatedChecks,

    /// Whether the pull request was merged
    pub outcome: MergeOutcome,
}

/// Opens pull requests and merges them once their required checks succeeded.
///
/// `AutoMerger` owns the platform provider, the target repository and the
/// pipeline configuration. The stages can be driven one at a time, which lets
/// callers report progress between them, or all at once with [`AutoMerger::run`].
#[derive(Debug)]
pub struct AutoMerger<P: PullRequestProvider + std::fmt::Debug> {
    provider: P,
    repository: RepositoryRef,
    config: PipelineConfig,
}

impl<P: PullRequestProvider + std::fmt::Debug> AutoMerger<P> {
    /// Creates a new `AutoMerger`.
    ///
    /// # Arguments
    ///
    /// * `provider` - An implementation of the `PullRequestProvider` trait
    /// * `repository` - The repository pull requests are opened against
    /// * `config` - The pipeline configuration
    pub fn new(provider: P, repository: RepositoryRef, config: PipelineConfig) -> Self {
        Self {
            provider,
            repository,
            config,
        }
    }

    /// Opens a pull request merging `head_branch` into `base_branch`.
    ///
    /// The head is qualified with the repository owner (see
    /// [`RepositoryRef::qualify_head`]) and the title and body come from the
    /// configured template.
    ///
    /// # Errors
    ///
    /// Returns [`AutoMergeError::RequestFailure`] when the platform does not
    /// answer with "created".
    #[instrument(skip(self))]
    pub async fn submit_pull_request(
        &self,
        head_branch: &str,
        base_branch: &str,
    ) -> Result<PullRequest, AutoMergeError> {
        let request = NewPullRequest {
            title: self.config.pull_request.title.clone(),
            body: self
                .config
                .pull_request
                .render_body(head_branch, base_branch),
            head: self.repository.qualify_head(head_branch),
            base: base_branch.to_string(),
        };

        info!(
            repository_owner = self.repository.owner.as_str(),
            repository = self.repository.name.as_str(),
            head = request.head.as_str(),
            base = base_branch,
            "Opening pull request",
        );

        let pull_request = self
            .provider
            .create_pull_request(&self.repository.owner, &self.repository.name, &request)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = self.repository.owner.as_str(),
                    repository = self.repository.name.as_str(),
                    error = e.to_string(),
                    "Failed to open the pull request"
                );
                AutoMergeError::from_provider(Operation::CreatePullRequest, e)
            })?;

        info!(
            repository_owner = self.repository.owner.as_str(),
            repository = self.repository.name.as_str(),
            pull_request = pull_request.number,
            commit = pull_request.head_sha.as_str(),
            "Opened pull request",
        );

        Ok(pull_request)
    }

    /// Lists and aggregates the check runs of `commit_sha`.
    ///
    /// An empty listing is not an error: the returned aggregation has
    /// `no_checks_found` set and every required check missing.
    #[instrument(skip(self))]
    pub async fn collect_check_runs(
        &self,
        commit_sha: &str,
    ) -> Result<AggregatedChecks, AutoMergeError> {
        let listing = polling::fetch_check_runs(
            &self.provider,
            &self.repository,
            commit_sha,
            &self.config.polling,
        )
        .await?;

        if listing.is_empty() {
            warn!(
                repository_owner = self.repository.owner.as_str(),
                repository = self.repository.name.as_str(),
                commit = commit_sha,
                "No check runs found for the commit",
            );
        }

        let aggregated = aggregate(
            self.config.checks.policy,
            &listing,
            &self.config.checks.required,
        );

        for check in &aggregated.required {
            debug!(
                commit = commit_sha,
                check = check.name.as_str(),
                state = ?check.state,
                "Required check state",
            );
        }

        Ok(aggregated)
    }

    /// Merges `pull_request` if every required check in `checks` succeeded.
    ///
    /// No merge call is made when the merge is blocked.
    ///
    /// # Errors
    ///
    /// Returns [`AutoMergeError::RequestFailure`] when the platform refuses the
    /// merge. The pull request is left open.
    #[instrument(skip(self, pull_request, checks), fields(pull_request = pull_request.number))]
    pub async fn merge_if_permitted(
        &self,
        pull_request: &PullRequest,
        checks: &AggregatedChecks,
    ) -> Result<MergeOutcome, AutoMergeError> {
        let reasons = match decide(&checks.required) {
            MergeDecision::Merge => None,
            MergeDecision::Blocked(reasons) => Some(reasons),
        };

        if let Some(reasons) = reasons {
            info!(
                repository_owner = self.repository.owner.as_str(),
                repository = self.repository.name.as_str(),
                pull_request = pull_request.number,
                blocking = reasons.len(),
                "Required checks did not all succeed. Not merging the pull request",
            );
            return Ok(MergeOutcome::Blocked(reasons));
        }

        info!(
            repository_owner = self.repository.owner.as_str(),
            repository = self.repository.name.as_str(),
            pull_request = pull_request.number,
            "All required checks succeeded. Merging the pull request",
        );

        let result = self
            .provider
            .merge_pull_request(
                &self.repository.owner,
                &self.repository.name,
                pull_request.number,
                MERGE_COMMIT_TITLE,
                MergeMethod::Merge,
            )
            .await
            .map_err(|e| {
                error!(
                    repository_owner = self.repository.owner.as_str(),
                    repository = self.repository.name.as_str(),
                    pull_request = pull_request.number,
                    error = e.to_string(),
                    "Failed to merge the pull request"
                );
                AutoMergeError::from_provider(Operation::MergePullRequest, e)
            })?;

        Ok(MergeOutcome::Merged(result))
    }

    /// Runs the whole pipeline for `head_branch` into `base_branch`.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage; later stages are not run.
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        head_branch: &str,
        base_branch: &str,
    ) -> Result<AutoMergeReport, AutoMergeError> {
        self.config.validate()?;

        let pull_request = self.submit_pull_request(head_branch, base_branch).await?;
        let checks = self.collect_check_runs(&pull_request.head_sha).await?;
        let outcome = self.merge_if_permitted(&pull_request, &checks).await?;

        Ok(AutoMergeReport {
            pull_request,
            checks,
            outcome,
        })
    }
}
