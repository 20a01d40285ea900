use pretty_assertions::assert_eq;
use repolens::config::AnalysisConfig;
use repolens::heuristics::PatternDetector;

#[test]
fn auth_path_sets_only_authentication() {
    let flags = PatternDetector::new().detect_paths(["src/auth/login.ts"]);

    assert!(flags["authentication"]);
    for (name, present) in &flags {
        if name != "authentication" {
            assert!(!present, "{name} unexpectedly detected");
        }
    }
}

#[test]
fn every_category_is_reported() {
    let flags = PatternDetector::new().detect_paths(Vec::<&str>::new());

    let names: Vec<&str> = flags.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["api", "authentication", "ci_cd", "database", "docker", "payment"]
    );
    assert!(flags.values().all(|present| !present));
}

#[test]
fn matching_is_case_insensitive_and_covers_directories() {
    let flags = PatternDetector::new().detect_paths([
        "src/Controllers/Home.java",
        "infra/Docker/build.go",
        "lib/StripeClient.rb",
        "models/MongoStore.py",
    ]);

    assert!(flags["api"]);
    assert!(flags["docker"]);
    assert!(flags["payment"]);
    assert!(flags["database"]);
    assert!(!flags["authentication"]);
    assert!(!flags["ci_cd"]);
}

#[test]
fn flags_stay_true_across_later_paths() {
    let flags = PatternDetector::new().detect_paths(["src/jwt.ts", "src/plain.ts", "x.py"]);
    assert!(flags["authentication"]);
}

#[test]
fn custom_categories_replace_defaults() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[[patterns]]
name = "queue"
keywords = ["kafka", "rabbit"]
"#,
    )
    .unwrap();

    let flags = PatternDetector::with_config(&config).detect_paths(["svc/kafka_consumer.py"]);
    assert_eq!(flags.len(), 1);
    assert!(flags["queue"]);
}

#[test]
fn repeated_category_keeps_earlier_match() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[[patterns]]
name = "authentication"
keywords = ["auth"]

[[patterns]]
name = "authentication"
keywords = ["zzz"]
"#,
    )
    .unwrap();

    let flags = PatternDetector::with_config(&config).detect_paths(["src/auth/login.ts"]);
    assert_eq!(flags.len(), 1);
    assert!(flags["authentication"]);
}

#[test]
fn mixed_case_keywords_match_mixed_case_paths() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[[patterns]]
name = "queue"
keywords = ["Kafka"]
"#,
    )
    .unwrap();

    let flags = PatternDetector::with_config(&config).detect_paths(["src/Kafka/consumer.ts"]);
    assert!(flags["queue"]);
}
