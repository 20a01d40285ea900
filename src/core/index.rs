use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::graph::DependencyGraph;
use crate::heuristics::FrameworkLabel;

pub type PatternFlags = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Source,
    Test,
    Config,
}

impl FileType {
    /// Classify a root-relative posix path by name alone
    pub fn classify(path: &str) -> Self {
        let lower = path.to_lowercase();
        let name = lower.rsplit('/').next().unwrap_or(&lower);
        let stem = name.split('.').next().unwrap_or(name);

        let in_test_dir = lower
            .split('/')
            .rev()
            .skip(1)
            .any(|dir| matches!(dir, "test" | "tests" | "__tests__" | "spec"));
        if in_test_dir
            || stem.starts_with("test_")
            || stem.ends_with("_test")
            || name.contains(".test.")
            || name.contains(".spec.")
        {
            return FileType::Test;
        }

        if matches!(stem, "config" | "settings" | "setup" | "conftest") || name.contains(".config.")
        {
            return FileType::Config;
        }

        FileType::Source
    }
}

/// One scanned file as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub language: String,
    /// Resolved in-tree dependency paths, same order as the graph edges
    pub imports: Vec<String>,
    pub size: u64,
    pub file_type: FileType,
}

/// Result of one repository analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoIndex {
    pub repo_id: String,
    pub framework: FrameworkLabel,
    pub files: Vec<FileRecord>,
    pub dependency_graph: DependencyGraph,
    pub total_files: usize,
    pub patterns: PatternFlags,
    pub indexed_at: DateTime<Utc>,
}

impl RepoIndex {
    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn detected_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns
            .iter()
            .filter(|(_, present)| **present)
            .map(|(name, _)| name.as_str())
    }
}
