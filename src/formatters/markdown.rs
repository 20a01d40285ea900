//! Human-readable repository overview.
//!
//! Sections:
//! - **SUMMARY**: framework, file count, edge count
//! - **LANGUAGES**: files per language
//! - **PATTERNS**: detected architectural concerns
//! - **HOTSPOTS**: most imported files (in-degree)
//! - **DEPENDENCIES**: per-file adjacency list

use anyhow::{Context, Result};
use petgraph::Direction;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::RepoIndex;

const DEFAULT_HOTSPOTS: usize = 10;

pub struct MarkdownFormatter {
    hotspot_limit: usize,
    include_adjacency: bool,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            hotspot_limit: DEFAULT_HOTSPOTS,
            include_adjacency: true,
        }
    }

    pub fn with_hotspot_limit(mut self, limit: usize) -> Self {
        self.hotspot_limit = limit;
        self
    }

    pub fn with_adjacency(mut self, enabled: bool) -> Self {
        self.include_adjacency = enabled;
        self
    }

    pub fn format_to_file(&self, index: &RepoIndex, output_path: &Path) -> Result<()> {
        let content = self.format_index(index)?;
        fs::write(output_path, content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_index(&self, index: &RepoIndex) -> Result<String> {
        let mut out = String::with_capacity(1024 + index.files.len() * 64);
        let graph = &index.dependency_graph;

        writeln!(out, "# REPOLENS: {}", index.repo_id)?;
        writeln!(out)?;

        writeln!(out, "## SUMMARY")?;
        writeln!(out, "FRAMEWORK: {}", index.framework)?;
        writeln!(out, "FILES: {}", index.total_files)?;
        writeln!(out, "EDGES: {}", graph.edge_count())?;
        writeln!(out, "INDEXED_AT: {}", index.indexed_at.to_rfc3339())?;
        writeln!(out)?;

        let mut languages: BTreeMap<&str, usize> = BTreeMap::new();
        for file in &index.files {
            *languages.entry(file.language.as_str()).or_default() += 1;
        }
        writeln!(out, "## LANGUAGES")?;
        for (language, count) in &languages {
            writeln!(out, "- {language}: {count}")?;
        }
        writeln!(out)?;

        writeln!(out, "## PATTERNS")?;
        let detected: Vec<&str> = index.detected_patterns().collect();
        if detected.is_empty() {
            writeln!(out, "(none)")?;
        } else {
            writeln!(out, "{}", detected.join(", "))?;
        }
        writeln!(out)?;

        self.write_hotspots(&mut out, index)?;

        if self.include_adjacency {
            writeln!(out, "## DEPENDENCIES")?;
            for (source, targets) in graph.as_map() {
                if targets.is_empty() {
                    continue;
                }
                writeln!(out, "{source} -> {}", targets.join(", "))?;
            }
            writeln!(out)?;
        }

        Ok(out)
    }

    fn write_hotspots(&self, out: &mut String, index: &RepoIndex) -> Result<()> {
        let graph = index.dependency_graph.to_petgraph();

        let mut ranked: Vec<(&str, usize)> = graph
            .node_indices()
            .map(|idx| {
                let fan_in = graph.neighbors_directed(idx, Direction::Incoming).count();
                (graph[idx].as_str(), fan_in)
            })
            .filter(|(_, fan_in)| *fan_in > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        writeln!(out, "## HOTSPOTS")?;
        if ranked.is_empty() {
            writeln!(out, "(none)")?;
        }
        for (path, fan_in) in ranked.into_iter().take(self.hotspot_limit) {
            writeln!(out, "{path} <- {fan_in}")?;
        }
        writeln!(out)?;
        Ok(())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}
