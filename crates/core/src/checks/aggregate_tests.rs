use super::*;
use crate::checks::required::CheckState;
use auto_merge_developer_platforms::models::{CheckConclusion, CheckStatus};

fn completed(name: &str, conclusion: CheckConclusion) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: CheckStatus::Completed,
        conclusion: Some(conclusion),
    }
}

fn tracked(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_listing_from_empty_runs_is_no_checks_found() {
    let listing = CheckRunListing::from_runs(Vec::new());

    assert_eq!(listing, CheckRunListing::NoChecksFound);
    assert!(listing.is_empty());
    assert!(listing.runs().is_empty());
}

#[test]
fn test_deduplicate_keeps_last_occurrence_in_first_position() {
    let runs = vec![
        completed("build", CheckConclusion::Failure),
        completed("lint", CheckConclusion::Success),
        completed("build", CheckConclusion::Success),
    ];

    let unique = deduplicate_by_name(&runs);

    assert_eq!(
        unique,
        vec![
            completed("build", CheckConclusion::Success),
            completed("lint", CheckConclusion::Success),
        ]
    );
}

#[test]
fn test_deduplicate_without_duplicates_is_unchanged() {
    let runs = vec![
        completed("a", CheckConclusion::Success),
        completed("b", CheckConclusion::Neutral),
    ];

    assert_eq!(deduplicate_by_name(&runs), runs);
}

#[test]
fn test_scan_exposes_raw_list() {
    let runs = vec![
        completed("build", CheckConclusion::Failure),
        completed("build", CheckConclusion::Success),
    ];
    let listing = CheckRunListing::from_runs(runs.clone());

    let aggregated = aggregate(AggregationPolicy::Scan, &listing, &tracked(&["build"]));

    assert_eq!(aggregated.policy, AggregationPolicy::Scan);
    assert_eq!(aggregated.check_runs, runs);
    assert!(aggregated.required.all_successful());
    assert!(!aggregated.no_checks_found);
}

#[test]
fn test_deduplicate_exposes_unique_list() {
    let listing = CheckRunListing::from_runs(vec![
        completed("build", CheckConclusion::Failure),
        completed("Run npm on Ubuntu", CheckConclusion::Success),
        completed("build", CheckConclusion::Success),
    ]);

    let aggregated = aggregate(
        AggregationPolicy::Deduplicate,
        &listing,
        &tracked(&["build", "Run npm on Ubuntu"]),
    );

    assert_eq!(aggregated.check_runs.len(), 2);
    assert_eq!(aggregated.check_runs[0].name, "build");
    assert_eq!(
        aggregated.check_runs[0].conclusion,
        Some(CheckConclusion::Success)
    );
    assert!(aggregated.required.all_successful());
}

#[test]
fn test_policies_agree_on_required_set() {
    let listings = vec![
        vec![
            completed("build", CheckConclusion::Success),
            completed("build", CheckConclusion::Failure),
        ],
        vec![
            completed("build", CheckConclusion::Failure),
            completed("test", CheckConclusion::Success),
            completed("build", CheckConclusion::Success),
        ],
        vec![completed("other", CheckConclusion::Success)],
        vec![CheckRun {
            name: "test".to_string(),
            status: CheckStatus::InProgress,
            conclusion: None,
        }],
    ];
    let names = tracked(&["build", "test"]);

    for runs in listings {
        let listing = CheckRunListing::from_runs(runs);
        let scanned = aggregate(AggregationPolicy::Scan, &listing, &names);
        let deduplicated = aggregate(AggregationPolicy::Deduplicate, &listing, &names);

        assert_eq!(scanned.required, deduplicated.required);
    }
}

#[test]
fn test_no_checks_found_leaves_everything_missing() {
    let aggregated = aggregate(
        AggregationPolicy::Deduplicate,
        &CheckRunListing::NoChecksFound,
        &tracked(&["build", "Run npm on Ubuntu"]),
    );

    assert!(aggregated.no_checks_found);
    assert!(aggregated.check_runs.is_empty());
    assert!(aggregated
        .required
        .iter()
        .all(|check| check.state == CheckState::Missing));
}
