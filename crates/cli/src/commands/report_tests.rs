use super::*;
use auto_merge_developer_platforms::models::{CheckConclusion, CheckStatus};

#[test]
fn test_describe_required_check() {
    let missing = RequiredCheck {
        name: "Run npm on Ubuntu".to_string(),
        state: CheckState::Missing,
    };
    let failed = RequiredCheck {
        name: "build".to_string(),
        state: CheckState::Observed {
            status: CheckStatus::Completed,
            conclusion: Some(CheckConclusion::Failure),
        },
    };
    let running = RequiredCheck {
        name: "lint".to_string(),
        state: CheckState::Observed {
            status: CheckStatus::InProgress,
            conclusion: None,
        },
    };

    assert_eq!(describe_required_check(&missing), "Run npm on Ubuntu: missing");
    assert_eq!(describe_required_check(&failed), "build: failure");
    assert_eq!(
        describe_required_check(&running),
        "lint: not completed (in_progress)"
    );
}
