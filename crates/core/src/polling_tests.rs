use super::*;
use async_trait::async_trait;
use auto_merge_developer_platforms::errors::Error;
use auto_merge_developer_platforms::models::{
    CheckConclusion, CheckRun, CheckStatus, MergeMethod, MergeResult, NewPullRequest, PullRequest,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider answering the listing calls from a script, one entry per call.
#[derive(Debug, Default)]
struct ScriptedProvider {
    listings: Mutex<VecDeque<Result<Vec<CheckRun>, Error>>>,
    list_calls: Mutex<u32>,
}

impl ScriptedProvider {
    fn new(listings: Vec<Result<Vec<CheckRun>, Error>>) -> Self {
        Self {
            listings: Mutex::new(listings.into()),
            list_calls: Mutex::new(0),
        }
    }

    fn list_calls(&self) -> u32 {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl PullRequestProvider for ScriptedProvider {
    async fn create_pull_request(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _pull_request: &NewPullRequest,
    ) -> Result<PullRequest, Error> {
        unreachable!("polling never opens pull requests")
    }

    async fn list_check_runs(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _commit_sha: &str,
    ) -> Result<Vec<CheckRun>, Error> {
        *self.list_calls.lock().unwrap() += 1;
        self.listings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn merge_pull_request(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _pr_number: u64,
        _commit_title: &str,
        _method: MergeMethod,
    ) -> Result<MergeResult, Error> {
        unreachable!("polling never merges pull requests")
    }
}

fn build_success() -> Vec<CheckRun> {
    vec![CheckRun {
        name: "build".to_string(),
        status: CheckStatus::Completed,
        conclusion: Some(CheckConclusion::Success),
    }]
}

fn repository() -> RepositoryRef {
    RepositoryRef::new("krkredde", "gauto")
}

fn polling(max_attempts: u32) -> PollingConfig {
    PollingConfig {
        enabled: true,
        max_attempts,
        interval_secs: 0,
    }
}

#[tokio::test]
async fn test_disabled_polling_lists_once() {
    let provider = ScriptedProvider::new(vec![Ok(Vec::new()), Ok(build_success())]);

    let listing = fetch_check_runs(&provider, &repository(), "abc", &PollingConfig::default())
        .await
        .expect("listing should succeed");

    assert_eq!(listing, CheckRunListing::NoChecksFound);
    assert_eq!(provider.list_calls(), 1);
}

#[tokio::test]
async fn test_disabled_polling_returns_found_runs() {
    let provider = ScriptedProvider::new(vec![Ok(build_success())]);

    let listing = fetch_check_runs(&provider, &repository(), "abc", &PollingConfig::default())
        .await
        .expect("listing should succeed");

    assert_eq!(listing, CheckRunListing::Found(build_success()));
}

#[tokio::test]
async fn test_polling_stops_at_first_non_empty_listing() {
    let provider = ScriptedProvider::new(vec![
        Ok(Vec::new()),
        Ok(Vec::new()),
        Ok(build_success()),
        Ok(build_success()),
    ]);

    let listing = fetch_check_runs(&provider, &repository(), "abc", &polling(5))
        .await
        .expect("listing should succeed");

    assert_eq!(listing, CheckRunListing::Found(build_success()));
    assert_eq!(provider.list_calls(), 3);
}

#[tokio::test]
async fn test_polling_exhausted() {
    let provider = ScriptedProvider::new(Vec::new());

    let result = fetch_check_runs(&provider, &repository(), "abc", &polling(4)).await;

    assert!(matches!(
        result,
        Err(AutoMergeError::PollExhausted { attempts: 4 })
    ));
    assert_eq!(provider.list_calls(), 4);
}

#[tokio::test]
async fn test_request_failure_halts_polling() {
    let provider = ScriptedProvider::new(vec![
        Ok(Vec::new()),
        Err(Error::RequestFailure {
            status: 404,
            body: "Not Found".to_string(),
        }),
        Ok(build_success()),
    ]);

    let result = fetch_check_runs(&provider, &repository(), "abc", &polling(5)).await;

    match result {
        Err(AutoMergeError::RequestFailure {
            operation, status, ..
        }) => {
            assert_eq!(operation, Operation::ListCheckRuns);
            assert_eq!(status, 404);
        }
        other => panic!("Expected RequestFailure, got {other:?}"),
    }
    assert_eq!(provider.list_calls(), 2);
}
