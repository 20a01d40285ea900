use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::cancel::CancellationToken;
use super::error::{AnalysisError, Result};
use super::graph::{DependencyGraph, GraphBuilder};
use super::index::{FileRecord, FileType, PatternFlags, RepoIndex};
use super::resolver::ModuleIndex;
use super::scanner::{FileScanner, SourceFile};
use crate::config::AnalysisConfig;
use crate::extractors::ExtractorRegistry;
use crate::heuristics::{detect_framework, FrameworkLabel, PatternDetector};

/// Runs the full scan -> extract -> resolve -> classify pipeline for one root
pub struct RepoAnalyzer {
    config: Arc<AnalysisConfig>,
    extractors: ExtractorRegistry,
}

impl RepoAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        let extractors = ExtractorRegistry::with_config(&config);
        Self {
            config: Arc::new(config),
            extractors,
        }
    }

    pub fn analyze(&self, root_path: &Path, repo_id: &str) -> Result<RepoIndex> {
        self.analyze_cancellable(root_path, repo_id, &CancellationToken::new())
    }

    /// Like [`RepoAnalyzer::analyze`], but gives up with
    /// [`AnalysisError::Cancelled`] once `cancel` fires. Never returns a
    /// partial index.
    pub fn analyze_cancellable(
        &self,
        root_path: &Path,
        repo_id: &str,
        cancel: &CancellationToken,
    ) -> Result<RepoIndex> {
        let start = Instant::now();

        log::info!("Scanning files under {}", root_path.display());
        let files =
            FileScanner::with_config(&self.config).scan_cancellable(root_path, cancel)?;
        log::info!("Found {} files to analyze", files.len());

        let index = ModuleIndex::build(&files);
        log::debug!("Module index holds {} keys", index.len());

        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled(root_path.to_path_buf()));
        }

        let (graph, (framework, patterns)) = rayon::join(
            || GraphBuilder::build_from_files(root_path, &files, &self.extractors, &index, cancel),
            || self.classify(root_path, &files),
        );
        let graph = graph.ok_or_else(|| AnalysisError::Cancelled(root_path.to_path_buf()))?;

        log::info!(
            "Built dependency graph: {} nodes, {} edges; framework {}",
            graph.node_count(),
            graph.edge_count(),
            framework
        );

        let files = file_records(files, &graph);
        let total_files = files.len();

        log::info!(
            "Analysis completed in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        Ok(RepoIndex {
            repo_id: repo_id.to_string(),
            framework,
            files,
            dependency_graph: graph,
            total_files,
            patterns,
            indexed_at: Utc::now(),
        })
    }

    /// Run the analysis on the blocking pool, abandoning it after `limit`
    pub async fn analyze_with_timeout(
        self: Arc<Self>,
        root_path: PathBuf,
        repo_id: String,
        limit: Duration,
    ) -> Result<RepoIndex> {
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        let worker_root = root_path.clone();

        let task = tokio::task::spawn_blocking(move || {
            self.analyze_cancellable(&worker_root, &repo_id, &worker_cancel)
        });

        match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(AnalysisError::TaskFailed(join_err.to_string())),
            Err(_) => {
                cancel.cancel();
                log::warn!(
                    "Analysis of {} exceeded {:.1}s; cancelling",
                    root_path.display(),
                    limit.as_secs_f64()
                );
                Err(AnalysisError::TimedOut {
                    path: root_path,
                    seconds: limit.as_secs_f64(),
                })
            }
        }
    }

    fn classify(&self, root_path: &Path, files: &[SourceFile]) -> (FrameworkLabel, PatternFlags) {
        rayon::join(
            || detect_framework(root_path),
            || PatternDetector::with_config(&self.config).detect(files),
        )
    }
}

impl Default for RepoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn file_records(files: Vec<SourceFile>, graph: &DependencyGraph) -> Vec<FileRecord> {
    files
        .into_iter()
        .map(|file| {
            let imports = graph
                .dependencies(&file.path)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            FileRecord {
                file_type: FileType::classify(&file.path),
                path: file.path,
                language: file.language,
                imports,
                size: file.size,
            }
        })
        .collect()
}
