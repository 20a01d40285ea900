use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

use super::cancel::CancellationToken;
use super::error::{AnalysisError, Result};
use crate::config::{AnalysisConfig, DEFAULT_CONFIG};

/// A scanned source file. Identity is the root-relative posix path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub language: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, language: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            size,
        }
    }

    /// File name without its final extension
    pub fn stem(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }

    /// Directory segments leading to the file, root first
    pub fn dir_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.path.split('/').collect();
        segments.pop();
        segments
    }
}

pub struct FileScanner<'a> {
    config: &'a AnalysisConfig,
}

impl FileScanner<'static> {
    pub fn new() -> Self {
        Self {
            config: &DEFAULT_CONFIG,
        }
    }
}

impl Default for FileScanner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FileScanner<'a> {
    pub fn with_config(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<SourceFile>> {
        self.scan_cancellable(root_path, &CancellationToken::new())
    }

    /// Walk `root_path`, stopping with [`AnalysisError::Cancelled`] as soon
    /// as `cancel` fires
    pub fn scan_cancellable(
        &self,
        root_path: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<SourceFile>> {
        if !root_path.exists() {
            return Err(AnalysisError::NotFound(root_path.to_path_buf()));
        }
        if !root_path.is_dir() {
            return Err(AnalysisError::NotADirectory(root_path.to_path_buf()));
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled(root_path.to_path_buf()));
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry under {}: {}", root_path.display(), err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(language) = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| self.config.language_for_extension(ext))
            else {
                continue;
            };

            let Some(relative) = relative_posix(root_path, entry.path()) else {
                continue;
            };

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(SourceFile::new(relative, language, size));
        }

        log::debug!("Scanned {} source files under {}", files.len(), root_path.display());
        Ok(files)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.config.is_ignored_dir(name))
                .unwrap_or(false)
    }
}

/// Root-relative path joined with `/` regardless of platform
fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
