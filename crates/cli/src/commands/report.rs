use auto_merge_core::checks::aggregate::AggregatedChecks;
use auto_merge_core::checks::required::{CheckState, RequiredCheck};
use auto_merge_core::config::AggregationPolicy;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Prints the check runs of a commit as aggregated.
pub fn print_check_runs(commit_sha: &str, checks: &AggregatedChecks) {
    if checks.no_checks_found {
        println!("No check runs found for commit {}", commit_sha);
        return;
    }

    let heading = match checks.policy {
        AggregationPolicy::Deduplicate => "Unique check runs",
        AggregationPolicy::Scan => "Check runs",
    };
    println!("{} for commit {}:", heading, commit_sha);
    for run in &checks.check_runs {
        println!("  {}", run);
    }
}

/// Prints the state of every required check, in configured order.
pub fn print_required_checks(checks: &AggregatedChecks) {
    println!("Required checks:");
    for check in &checks.required {
        println!("  {}", describe_required_check(check));
    }
}

/// One-line description of a required check, e.g. `build: success`.
pub fn describe_required_check(check: &RequiredCheck) -> String {
    let state = match check.state {
        CheckState::Missing => "missing".to_string(),
        CheckState::Observed {
            conclusion: Some(conclusion),
            ..
        } => conclusion.to_string(),
        CheckState::Observed {
            status,
            conclusion: None,
        } => format!("not completed ({})", status),
    };

    format!("{}: {}", check.name, state)
}
