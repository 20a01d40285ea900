pub mod analyzer;
pub mod cancel;
pub mod error;
pub mod graph;
pub mod index;
pub mod resolver;
pub mod scanner;

pub use analyzer::RepoAnalyzer;
pub use cancel::CancellationToken;
pub use error::{AnalysisError, Result};
pub use graph::{DependencyGraph, GraphBuilder};
pub use index::{FileRecord, FileType, PatternFlags, RepoIndex};
pub use resolver::ModuleIndex;
pub use scanner::{FileScanner, SourceFile};
