use pretty_assertions::assert_eq;
use repolens::core::RepoAnalyzer;
use repolens::formatters::JsonFormatter;
use serde_json::{json, Value};
use std::fs;

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("app")).unwrap();
    fs::write(dir.path().join("app/main.py"), "from .db import connect\n").unwrap();
    fs::write(dir.path().join("app/db.py"), "import os\n").unwrap();
    fs::write(dir.path().join("requirements.txt"), "fastapi==0.110\n").unwrap();
    dir
}

#[test]
fn json_formatter_outputs_repo_index_shape() {
    let dir = fixture();
    let index = RepoAnalyzer::new().analyze(dir.path(), "demo").unwrap();

    let out = dir.path().join("index.json");
    JsonFormatter::new().format_to_file(&index, &out).unwrap();

    let data = fs::read_to_string(&out).unwrap();
    let v: Value = serde_json::from_str(&data).unwrap();

    assert_eq!(v["repo_id"], json!("demo"));
    assert_eq!(v["framework"], json!("fastapi"));
    assert_eq!(v["total_files"], json!(2));
    assert_eq!(
        v["dependency_graph"],
        json!({
            "app/db.py": [],
            "app/main.py": ["app/db.py"]
        })
    );
    assert_eq!(v["patterns"]["database"], json!(true));
    assert_eq!(v["patterns"]["payment"], json!(false));
    assert!(v["indexed_at"].is_string());

    let files = v["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    let main = files
        .iter()
        .find(|f| f["path"] == json!("app/main.py"))
        .unwrap();
    assert_eq!(
        main,
        &json!({
            "path": "app/main.py",
            "language": "python",
            "imports": ["app/db.py"],
            "size": "from .db import connect\n".len(),
            "file_type": "source"
        })
    );
}

#[test]
fn compact_json_is_single_line_and_equivalent() {
    let dir = fixture();
    let index = RepoAnalyzer::new().analyze(dir.path(), "demo").unwrap();

    let pretty = JsonFormatter::new().format_index(&index).unwrap();
    let compact = JsonFormatter::compact().format_index(&index).unwrap();

    assert!(!compact.contains('\n'));
    let a: Value = serde_json::from_str(&pretty).unwrap();
    let b: Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(a, b);
}
