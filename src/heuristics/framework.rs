//! Primary framework detection from marker files and manifests.
//!
//! Detectors overlap (a Next.js app is also a Node project), so they run in a
//! fixed priority order and the first match wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkLabel {
    NextJs,
    Express,
    FastApi,
    Django,
    NodeJs,
    Python,
    Unknown,
}

impl FrameworkLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameworkLabel::NextJs => "nextjs",
            FrameworkLabel::Express => "express",
            FrameworkLabel::FastApi => "fastapi",
            FrameworkLabel::Django => "django",
            FrameworkLabel::NodeJs => "nodejs",
            FrameworkLabel::Python => "python",
            FrameworkLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FrameworkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Detector = fn(&Path) -> bool;

const DETECTION_ORDER: &[(FrameworkLabel, Detector)] = &[
    (FrameworkLabel::NextJs, is_nextjs),
    (FrameworkLabel::Express, is_express),
    (FrameworkLabel::FastApi, is_fastapi),
    (FrameworkLabel::Django, is_django),
    (FrameworkLabel::NodeJs, is_nodejs),
    (FrameworkLabel::Python, is_python),
];

const NEXT_CONFIG_FILES: &[&str] = &["next.config.js", "next.config.mjs", "next.config.ts"];
const FASTAPI_ENTRY_POINTS: &[&str] = &["main.py", "app.py", "api.py"];
const PYTHON_MARKERS: &[&str] = &[
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "Pipfile",
    "poetry.lock",
];

pub fn detect_framework(repo_path: &Path) -> FrameworkLabel {
    if !repo_path.is_dir() {
        return FrameworkLabel::Unknown;
    }

    DETECTION_ORDER
        .iter()
        .find(|(_, detect)| detect(repo_path))
        .map(|(label, _)| *label)
        .unwrap_or(FrameworkLabel::Unknown)
}

fn is_nextjs(repo_path: &Path) -> bool {
    if NEXT_CONFIG_FILES
        .iter()
        .any(|name| repo_path.join(name).exists())
    {
        return true;
    }

    read_package_json(repo_path)
        .map(|manifest| {
            has_dependency(&manifest, "dependencies", "next")
                || has_dependency(&manifest, "devDependencies", "next")
        })
        .unwrap_or(false)
}

fn is_express(repo_path: &Path) -> bool {
    read_package_json(repo_path)
        .map(|manifest| has_dependency(&manifest, "dependencies", "express"))
        .unwrap_or(false)
}

fn is_fastapi(repo_path: &Path) -> bool {
    let entry_point_imports = FASTAPI_ENTRY_POINTS.iter().any(|name| {
        read_text(&repo_path.join(name))
            .map(|content| {
                content.contains("from fastapi import") || content.contains("import fastapi")
            })
            .unwrap_or(false)
    });
    if entry_point_imports {
        return true;
    }

    ["requirements.txt", "pyproject.toml"]
        .iter()
        .any(|name| manifest_mentions(&repo_path.join(name), "fastapi"))
}

fn is_django(repo_path: &Path) -> bool {
    if repo_path.join("manage.py").exists() {
        return true;
    }

    if let Ok(entries) = fs::read_dir(repo_path) {
        let mut subdirs: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        let settings_marker = subdirs.iter().any(|dir| {
            read_text(&dir.join("settings.py"))
                .map(|content| {
                    content.contains("DJANGO_SETTINGS_MODULE") || content.contains("django.conf")
                })
                .unwrap_or(false)
        });
        if settings_marker {
            return true;
        }
    }

    // djangorestframework contains "django" and counts as well
    manifest_mentions(&repo_path.join("requirements.txt"), "django")
}

fn is_nodejs(repo_path: &Path) -> bool {
    repo_path.join("package.json").exists() || repo_path.join("node_modules").exists()
}

fn is_python(repo_path: &Path) -> bool {
    PYTHON_MARKERS
        .iter()
        .any(|marker| repo_path.join(marker).exists())
}

fn read_text(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            log::debug!("Ignoring unreadable marker {}: {}", path.display(), err);
            None
        }
    }
}

fn read_package_json(repo_path: &Path) -> Option<Value> {
    let path = repo_path.join("package.json");
    let content = read_text(&path)?;
    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            log::debug!("Ignoring malformed {}: {}", path.display(), err);
            None
        }
    }
}

fn has_dependency(manifest: &Value, section: &str, name: &str) -> bool {
    manifest
        .get(section)
        .and_then(Value::as_object)
        .map(|deps| deps.contains_key(name))
        .unwrap_or(false)
}

/// Case-insensitive substring search over a manifest's raw text
fn manifest_mentions(path: &Path, needle: &str) -> bool {
    read_text(path)
        .map(|content| content.to_lowercase().contains(needle))
        .unwrap_or(false)
}
