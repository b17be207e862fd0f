//! Retrieval of the check runs of a commit, optionally waiting for them to appear.
//!
//! Check runs are usually registered a little after a pull request is opened.
//! With polling disabled the list is fetched once and an empty result is
//! reported as [`CheckRunListing::NoChecksFound`]. With polling enabled the
//! list is fetched up to `max_attempts` times, sleeping between attempts,
//! until it is non-empty. A failed request is never retried.

use auto_merge_developer_platforms::PullRequestProvider;
use tracing::{debug, instrument, warn};

use crate::checks::aggregate::CheckRunListing;
use crate::config::{PollingConfig, RepositoryRef};
use crate::errors::{AutoMergeError, Operation};

#[cfg(test)]
#[path = "polling_tests.rs"]
mod tests;

/// Lists the check runs of `commit_sha`, honoring the polling settings.
///
/// # Errors
///
/// * [`AutoMergeError::RequestFailure`] or [`AutoMergeError::GitProviderError`]
///   as soon as one listing call fails.
/// * [`AutoMergeError::PollExhausted`] when polling is enabled and no attempt
///   returned a check run.
#[instrument(
    skip(provider, repository, polling),
    fields(repository_owner = %repository.owner, repository = %repository.name)
)]
pub async fn fetch_check_runs<P>(
    provider: &P,
    repository: &RepositoryRef,
    commit_sha: &str,
    polling: &PollingConfig,
) -> Result<CheckRunListing, AutoMergeError>
where
    P: PullRequestProvider + ?Sized,
{
    let attempts = if polling.enabled {
        polling.max_attempts
    } else {
        1
    };

    for attempt in 1..=attempts {
        let runs = provider
            .list_check_runs(&repository.owner, &repository.name, commit_sha)
            .await
            .map_err(|e| AutoMergeError::from_provider(Operation::ListCheckRuns, e))?;

        debug!(
            commit = commit_sha,
            attempt,
            count = runs.len(),
            "Listed check runs"
        );

        if !runs.is_empty() {
            return Ok(CheckRunListing::Found(runs));
        }

        if !polling.enabled {
            return Ok(CheckRunListing::NoChecksFound);
        }

        if attempt < attempts {
            debug!(
                commit = commit_sha,
                attempt,
                interval_secs = polling.interval_secs,
                "No check runs yet, waiting before the next attempt"
            );
            tokio::time::sleep(polling.interval()).await;
        }
    }

    warn!(
        commit = commit_sha,
        attempts, "No check runs appeared while polling"
    );
    Err(AutoMergeError::PollExhausted { attempts })
}
