use super::*;

#[test]
fn test_describe_pipeline_with_defaults() {
    let config: AppConfig = toml::from_str(
        r#"
[repository]
owner = "krkredde"
name = "gauto"
"#,
    )
    .expect("Failed to parse configuration");

    let description = describe_pipeline(&config);

    assert!(description.contains("Repository: krkredde/gauto"));
    assert!(description.contains("token from $GITHUB_TOKEN"));
    assert!(description.contains("Branches: head from $branch, base from $originalBranch"));
    assert!(description.contains("Aggregation policy: scan"));
    assert!(description.contains("Required checks:\n  - build\n"));
    assert!(description.contains("Polling: disabled"));
}

#[test]
fn test_describe_pipeline_with_fixed_branches_and_polling() {
    let config: AppConfig = toml::from_str(
        r#"
[repository]
owner = "krkredde"
name = "gauto"

[branches]
source = "fixed"
head = "auto_merge"
base = "main"

[checks]
policy = "deduplicate"
required = ["build", "Run npm on Ubuntu"]

[polling]
enabled = true
max_attempts = 3
interval_secs = 5
"#,
    )
    .expect("Failed to parse configuration");

    let description = describe_pipeline(&config);

    assert!(description.contains("Branches: head 'auto_merge', base 'main'"));
    assert!(description.contains("Aggregation policy: deduplicate"));
    assert!(description.contains("  - build\n  - Run npm on Ubuntu\n"));
    assert!(description.contains("Polling: up to 3 attempts, 5s apart"));
}

#[test]
fn test_describe_pipeline_without_required_checks() {
    let config: AppConfig = toml::from_str(
        r#"
[repository]
owner = "krkredde"
name = "gauto"

[checks]
required = []
"#,
    )
    .expect("Failed to parse configuration");

    assert!(describe_pipeline(&config).contains("Required checks: none"));
}
