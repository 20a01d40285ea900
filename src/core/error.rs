use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures that abort a whole analysis. Per-file problems never surface here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Root path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Analysis of {path} timed out after {seconds:.1}s")]
    TimedOut { path: PathBuf, seconds: f64 },

    #[error("Analysis of {0} was cancelled")]
    Cancelled(PathBuf),

    #[error("Analysis task failed: {0}")]
    TaskFailed(String),
}
