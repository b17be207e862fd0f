use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{CheckRun, MergeMethod, MergeResult, NewPullRequest, PullRequest};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait for interacting with developer platforms that host pull requests (e.g., GitHub).
///
/// Implementations provide the three single-shot calls the auto-merge pipeline
/// is built from: opening a pull request, listing the check runs of a commit
/// and merging a pull request. Implementations must not retry failed calls;
/// a failure is reported to the caller as-is.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use auto_merge_developer_platforms::{PullRequestProvider, errors::Error};
/// use auto_merge_developer_platforms::models::{
///     CheckRun, MergeMethod, MergeResult, NewPullRequest, PullRequest,
/// };
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct InMemoryProvider;
///
/// #[async_trait]
/// impl PullRequestProvider for InMemoryProvider {
///     async fn create_pull_request(
///         &self,
///         repo_owner: &str,
///         repo_name: &str,
///         pull_request: &NewPullRequest,
///     ) -> Result<PullRequest, Error> {
///         Ok(PullRequest {
///             number: 1,
///             html_url: format!("https://example.com/{repo_owner}/{repo_name}/pull/1"),
///             head_sha: "abc123".to_string(),
///         })
///     }
///
///     # async fn list_check_runs(&self, _: &str, _: &str, _: &str) -> Result<Vec<CheckRun>, Error> { unimplemented!() }
///     # async fn merge_pull_request(&self, _: &str, _: &str, _: u64, _: &str, _: MergeMethod) -> Result<MergeResult, Error> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait PullRequestProvider {
    /// Opens a new pull request.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pull_request` - Title, body, head and base of the pull request
    ///
    /// # Returns
    ///
    /// The created pull request, including the commit at the tip of its head
    /// branch. Any response other than "created" is an
    /// [`Error::RequestFailure`].
    async fn create_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest, Error>;

    /// Lists the check runs reported for a commit.
    ///
    /// The check runs are returned in the order the platform reports them,
    /// including repeated entries for re-run checks. An empty list is a valid
    /// answer.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `commit_sha` - The commit to inspect
    async fn list_check_runs(
        &self,
        repo_owner: &str,
        repo_name: &str,
        commit_sha: &str,
    ) -> Result<Vec<CheckRun>, Error>;

    /// Merges a pull request.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    /// * `commit_title` - The title of the merge commit
    /// * `method` - The merge strategy
    async fn merge_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        commit_title: &str,
        method: MergeMethod,
    ) -> Result<MergeResult, Error>;
}
