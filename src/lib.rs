//! # REPOLENS
//!
//! Fast repository structure analysis.
//!
//! REPOLENS walks a source tree, pulls import statements out of each file with
//! lightweight lexical rules, resolves the local ones to other files in the
//! tree and assembles a file-level dependency graph. Two independent
//! heuristics run alongside: primary framework detection and
//! architectural-pattern detection.
//!
//! ## Output Formats
//!
//! - **JSON**: the full [`core::RepoIndex`], pretty or compact
//! - **Markdown**: summary with hotspots and adjacency lists
//!
//! ## Import Extraction
//!
//! Python, JavaScript, TypeScript. Other scanned languages appear as graph
//! nodes without edges.

pub mod config;
pub mod core;
pub mod extractors;
pub mod formatters;
pub mod heuristics;
