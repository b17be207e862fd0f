use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    errors::Error,
    models::{CheckRun, MergeMethod, MergeResult, NewPullRequest, PullRequest},
    PullRequestProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type sent in the `Accept` header of every request.
pub const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Value of the `User-Agent` header. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("auto-merge/", env!("CARGO_PKG_VERSION"));

/// Largest page size the check-runs endpoint accepts.
const CHECK_RUNS_PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
struct CreatedPullRequest {
    number: u64,
    #[serde(default)]
    html_url: String,
    head: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CheckRunsPage {
    #[serde(default)]
    check_runs: Vec<CheckRun>,
}

#[derive(Debug, Serialize)]
struct MergeRequest<'a> {
    commit_title: &'a str,
    merge_method: MergeMethod,
}

/// GitHub implementation of [`PullRequestProvider`] on top of the REST API.
///
/// Every request carries the bearer token in the `Authorization` header and
/// the fixed [`GITHUB_ACCEPT_HEADER`] media type. Each operation accepts
/// exactly one status code as success: `201` when creating a pull request,
/// `200` for listing check runs and for merging. Anything else is turned into
/// [`Error::RequestFailure`] carrying the raw status and body.
///
/// # Example
///
/// ```rust,no_run
/// use auto_merge_developer_platforms::github::{GitHubProvider, DEFAULT_API_URL};
/// use auto_merge_developer_platforms::PullRequestProvider;
///
/// # async fn example() -> Result<(), auto_merge_developer_platforms::errors::Error> {
/// let provider = GitHubProvider::new(DEFAULT_API_URL, "ghp_example")?;
/// let runs = provider
///     .list_check_runs("krkredde", "gauto", "6dcb09b5b57875f334f61aebed695e2e4193db5e")
///     .await?;
/// println!("{} check runs", runs.len());
/// # Ok(())
/// # }
/// ```
pub struct GitHubProvider {
    client: Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for GitHubProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GitHubProvider {
    /// Creates a provider talking to the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClientSetup`] if `base_url` is not an absolute
    /// `http`/`https` URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self, Error> {
        let base_url = base_url.trim_end_matches('/');
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| Error::ClientSetup(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::ClientSetup(format!(
                "Unsupported API URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientSetup(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token: token.to_string(),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repository_url(&self, repo_owner: &str, repo_name: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(repo_owner),
            urlencoding::encode(repo_name)
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, GITHUB_ACCEPT_HEADER)
    }
}

/// Passes the response through when it carries the expected status, otherwise
/// converts it into a [`Error::RequestFailure`] with the raw body.
async fn expect_status(
    response: Response,
    expected: StatusCode,
    operation: &str,
) -> Result<Response, Error> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(
        status = status.as_u16(),
        body = body.as_str(),
        "{}. Received an unexpected status from GitHub",
        operation
    );

    Err(Error::RequestFailure {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PullRequestProvider for GitHubProvider {
    #[instrument(skip(self, pull_request), fields(head = %pull_request.head, base = %pull_request.base))]
    async fn create_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest, Error> {
        let url = format!("{}/pulls", self.repository_url(repo_owner, repo_name));
        let response = self
            .request(Method::POST, url)
            .json(pull_request)
            .send()
            .await?;

        let response = expect_status(
            response,
            StatusCode::CREATED,
            "Failed to create pull request",
        )
        .await?;

        let created: CreatedPullRequest = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = created.number,
            commit = created.head.sha.as_str(),
            "Created pull request"
        );

        Ok(PullRequest {
            number: created.number,
            html_url: created.html_url,
            head_sha: created.head.sha,
        })
    }

    #[instrument(skip(self))]
    async fn list_check_runs(
        &self,
        repo_owner: &str,
        repo_name: &str,
        commit_sha: &str,
    ) -> Result<Vec<CheckRun>, Error> {
        let url = format!(
            "{}/commits/{}/check-runs",
            self.repository_url(repo_owner, repo_name),
            urlencoding::encode(commit_sha)
        );
        let response = self
            .request(Method::GET, url)
            .query(&[("per_page", CHECK_RUNS_PAGE_SIZE)])
            .send()
            .await?;

        let response =
            expect_status(response, StatusCode::OK, "Failed to list check runs").await?;

        let page: CheckRunsPage = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            commit = commit_sha,
            count = page.check_runs.len(),
            "Listed check runs"
        );

        Ok(page.check_runs)
    }

    #[instrument(skip(self))]
    async fn merge_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        commit_title: &str,
        method: MergeMethod,
    ) -> Result<MergeResult, Error> {
        let url = format!(
            "{}/pulls/{}/merge",
            self.repository_url(repo_owner, repo_name),
            pr_number
        );
        let payload = MergeRequest {
            commit_title,
            merge_method: method,
        };
        let response = self
            .request(Method::PUT, url)
            .json(&payload)
            .send()
            .await?;

        let response =
            expect_status(response, StatusCode::OK, "Failed to merge pull request").await?;

        // A 200 means the merge happened; the body is informational only.
        let body = response.text().await.unwrap_or_default();
        let result = serde_json::from_str::<MergeResult>(&body).unwrap_or_else(|e| {
            warn!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                error = e.to_string(),
                "Could not read the merge response body"
            );
            MergeResult {
                merged: true,
                ..MergeResult::default()
            }
        });

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            merged = result.merged,
            "Merged pull request"
        );

        Ok(result)
    }
}
