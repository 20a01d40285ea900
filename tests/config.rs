use repolens::config::{AnalysisConfig, DEFAULT_CONFIG};
use repolens::core::RepoAnalyzer;
use std::fs;

#[test]
fn default_tables_cover_scanned_languages() {
    assert_eq!(DEFAULT_CONFIG.language_for_extension("py"), Some("python"));
    assert_eq!(DEFAULT_CONFIG.language_for_extension("tsx"), Some("typescript"));
    assert_eq!(DEFAULT_CONFIG.language_for_extension("h"), Some("c"));
    assert_eq!(DEFAULT_CONFIG.language_for_extension("md"), None);
    assert!(DEFAULT_CONFIG.is_ignored_dir("node_modules"));
    assert!(DEFAULT_CONFIG.is_ignored_dir(".git"));
    assert_eq!(DEFAULT_CONFIG.patterns.len(), 6);
}

#[test]
fn toml_overrides_only_named_tables() {
    let config = AnalysisConfig::from_toml_str(
        r#"
python_external_roots = ["internal_sdk"]
js_local_prefixes = ["./", "~/"]

[extensions]
".vue" = "JavaScript"
"#,
    )
    .unwrap();

    assert!(config.python_external_roots.contains("internal_sdk"));
    assert!(!config.python_external_roots.contains("os"));
    assert_eq!(config.language_for_extension("vue"), Some("javascript"));
    assert_eq!(config.language_for_extension("py"), None);
    assert!(config.is_ignored_dir("node_modules"));
    assert_eq!(config.patterns, AnalysisConfig::default().patterns);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(AnalysisConfig::from_toml_str("ignored = [\"x\"]").is_err());
    assert!(AnalysisConfig::from_toml_str("ignore_dirs = 3").is_err());
}

#[test]
fn custom_tables_flow_through_the_analyzer() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("main.py"), "import internal_sdk\nimport helpers\n").unwrap();
    fs::write(dir.path().join("internal_sdk.py"), "").unwrap();
    fs::write(dir.path().join("helpers.py"), "").unwrap();

    let config = AnalysisConfig::from_toml_str(r#"python_external_roots = ["internal_sdk"]"#)
        .unwrap();
    let index = RepoAnalyzer::with_config(config)
        .analyze(dir.path(), "cfg")
        .unwrap();

    assert_eq!(index.file("main.py").unwrap().imports, vec!["helpers.py"]);
}

#[test]
fn config_file_is_read_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("repolens.toml");
    fs::write(&path, "ignore_dirs = [\"generated\"]\n").unwrap();

    let config = AnalysisConfig::from_toml_file(&path).unwrap();
    assert!(config.is_ignored_dir("generated"));
    assert!(!config.is_ignored_dir("node_modules"));

    assert!(AnalysisConfig::from_toml_file(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn repeated_pattern_names_merge_their_keywords() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[[patterns]]
name = "authentication"
keywords = ["auth"]

[[patterns]]
name = "queue"
keywords = ["kafka"]

[[patterns]]
name = "authentication"
keywords = ["zzz", "auth"]
"#,
    )
    .unwrap();

    let names: Vec<&str> = config.patterns.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["authentication", "queue"]);
    assert_eq!(config.patterns[0].keywords, vec!["auth", "zzz"]);
}

#[test]
fn pattern_keywords_are_lowercased() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[[patterns]]
name = "queue"
keywords = ["Kafka", "RabbitMQ"]
"#,
    )
    .unwrap();

    assert_eq!(config.patterns[0].keywords, vec!["kafka", "rabbitmq"]);
}
