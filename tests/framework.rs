use repolens::heuristics::{detect_framework, FrameworkLabel};
use std::fs;
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn detect(setup: impl FnOnce(&Path)) -> FrameworkLabel {
    let dir = tempfile::TempDir::new().unwrap();
    setup(dir.path());
    detect_framework(dir.path())
}

#[test]
fn next_dependency_without_config_file_is_nextjs() {
    let label = detect(|root| {
        write(root, "package.json", r#"{"dependencies": {"next": "^13.0.0"}}"#);
    });
    assert_eq!(label, FrameworkLabel::NextJs);
}

#[test]
fn next_config_file_wins_over_express_dependency() {
    let label = detect(|root| {
        write(root, "next.config.mjs", "export default {};\n");
        write(root, "package.json", r#"{"dependencies": {"express": "^4.0.0"}}"#);
    });
    assert_eq!(label, FrameworkLabel::NextJs);
}

#[test]
fn next_dev_dependency_counts() {
    let label = detect(|root| {
        write(root, "package.json", r#"{"devDependencies": {"next": "14"}}"#);
    });
    assert_eq!(label, FrameworkLabel::NextJs);
}

#[test]
fn express_dependency_is_express() {
    let label = detect(|root| {
        write(root, "package.json", r#"{"dependencies": {"express": "^4.18.0"}}"#);
    });
    assert_eq!(label, FrameworkLabel::Express);
}

#[test]
fn express_only_in_dev_dependencies_is_plain_node() {
    let label = detect(|root| {
        write(root, "package.json", r#"{"devDependencies": {"express": "^4.18.0"}}"#);
    });
    assert_eq!(label, FrameworkLabel::NodeJs);
}

#[test]
fn malformed_package_json_degrades_to_nodejs() {
    let label = detect(|root| {
        write(root, "package.json", "{ not json");
    });
    assert_eq!(label, FrameworkLabel::NodeJs);
}

#[test]
fn fastapi_entry_point_import() {
    let label = detect(|root| {
        write(root, "main.py", "from fastapi import FastAPI\napp = FastAPI()\n");
    });
    assert_eq!(label, FrameworkLabel::FastApi);
}

#[test]
fn fastapi_in_pyproject_is_case_insensitive() {
    let label = detect(|root| {
        write(root, "pyproject.toml", "[project]\ndependencies = [\"FastAPI>=0.100\"]\n");
    });
    assert_eq!(label, FrameworkLabel::FastApi);
}

#[test]
fn fastapi_outranks_django() {
    let label = detect(|root| {
        write(root, "manage.py", "");
        write(root, "requirements.txt", "fastapi\n");
    });
    assert_eq!(label, FrameworkLabel::FastApi);
}

#[test]
fn django_manage_py() {
    let label = detect(|root| write(root, "manage.py", "#!/usr/bin/env python\n"));
    assert_eq!(label, FrameworkLabel::Django);
}

#[test]
fn django_settings_in_subdirectory() {
    let label = detect(|root| {
        write(
            root,
            "mysite/settings.py",
            "from django.conf import global_settings\n",
        );
    });
    assert_eq!(label, FrameworkLabel::Django);
}

#[test]
fn django_rest_framework_requirement() {
    let label = detect(|root| write(root, "requirements.txt", "djangorestframework==3.14\n"));
    assert_eq!(label, FrameworkLabel::Django);
}

#[test]
fn node_modules_alone_is_nodejs() {
    let label = detect(|root| fs::create_dir_all(root.join("node_modules")).unwrap());
    assert_eq!(label, FrameworkLabel::NodeJs);
}

#[test]
fn python_marker_alone_is_python() {
    let label = detect(|root| write(root, "requirements.txt", "requests==2.31\n"));
    assert_eq!(label, FrameworkLabel::Python);
}

#[test]
fn empty_tree_and_missing_root_are_unknown() {
    assert_eq!(detect(|_| {}), FrameworkLabel::Unknown);

    let dir = tempfile::TempDir::new().unwrap();
    assert_eq!(
        detect_framework(&dir.path().join("missing")),
        FrameworkLabel::Unknown
    );
}

#[test]
fn labels_serialize_in_lowercase() {
    assert_eq!(
        serde_json::to_string(&FrameworkLabel::NextJs).unwrap(),
        "\"nextjs\""
    );
    assert_eq!(
        serde_json::to_string(&FrameworkLabel::FastApi).unwrap(),
        "\"fastapi\""
    );
    assert_eq!(FrameworkLabel::NodeJs.to_string(), "nodejs");
}
