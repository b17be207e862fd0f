use super::*;
use crate::checks::aggregate::{aggregate, CheckRunListing};
use crate::config::AggregationPolicy;
use auto_merge_developer_platforms::models::{CheckConclusion, CheckRun, CheckStatus};

fn completed(name: &str, conclusion: CheckConclusion) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: CheckStatus::Completed,
        conclusion: Some(conclusion),
    }
}

fn tracked() -> Vec<String> {
    vec!["build".to_string(), "Run npm on Ubuntu".to_string()]
}

#[test]
fn test_all_checks_successful_merges() {
    let listing = CheckRunListing::from_runs(vec![
        completed("build", CheckConclusion::Success),
        completed("Run npm on Ubuntu", CheckConclusion::Success),
    ]);

    for policy in [AggregationPolicy::Scan, AggregationPolicy::Deduplicate] {
        let aggregated = aggregate(policy, &listing, &tracked());

        assert_eq!(decide(&aggregated.required), MergeDecision::Merge);
    }
}

#[test]
fn test_failed_and_missing_checks_block() {
    let listing = CheckRunListing::from_runs(vec![completed("build", CheckConclusion::Failure)]);
    let aggregated = aggregate(AggregationPolicy::Scan, &listing, &tracked());

    let decision = decide(&aggregated.required);

    assert!(!decision.is_merge());
    assert_eq!(
        decision,
        MergeDecision::Blocked(vec![
            BlockingReason::Failed {
                name: "build".to_string(),
                conclusion: CheckConclusion::Failure,
            },
            BlockingReason::Missing {
                name: "Run npm on Ubuntu".to_string(),
            },
        ])
    );
}

#[test]
fn test_no_checks_found_blocks_with_every_name_missing() {
    let aggregated = aggregate(
        AggregationPolicy::Deduplicate,
        &CheckRunListing::NoChecksFound,
        &tracked(),
    );

    match decide(&aggregated.required) {
        MergeDecision::Blocked(reasons) => {
            let names: Vec<&str> = reasons.iter().map(|r| r.check_name()).collect();
            assert_eq!(names, vec!["build", "Run npm on Ubuntu"]);
            assert!(reasons
                .iter()
                .all(|r| matches!(r, BlockingReason::Missing { .. })));
        }
        MergeDecision::Merge => panic!("Expected the merge to be blocked"),
    }
}

#[test]
fn test_skipped_blocks() {
    let listing = CheckRunListing::from_runs(vec![
        completed("build", CheckConclusion::Skipped),
        completed("Run npm on Ubuntu", CheckConclusion::Success),
    ]);
    let aggregated = aggregate(AggregationPolicy::Scan, &listing, &tracked());

    assert!(!decide(&aggregated.required).is_merge());
}

#[test]
fn test_untracked_failures_do_not_block() {
    let listing = CheckRunListing::from_runs(vec![
        completed("build", CheckConclusion::Success),
        completed("Run npm on Ubuntu", CheckConclusion::Success),
        completed("Run PSScriptAnalyzer on Windows", CheckConclusion::Failure),
    ]);
    let aggregated = aggregate(AggregationPolicy::Scan, &listing, &tracked());

    assert_eq!(decide(&aggregated.required), MergeDecision::Merge);
}

#[test]
fn test_empty_required_set_is_vacuously_mergeable() {
    let required = RequiredCheckSet::new(Vec::<String>::new());

    assert_eq!(decide(&required), MergeDecision::Merge);
}
