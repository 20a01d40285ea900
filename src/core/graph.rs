use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::cancel::CancellationToken;
use super::resolver::ModuleIndex;
use super::scanner::SourceFile;
use crate::extractors::ExtractorRegistry;

/// File-level import graph: path -> ordered dependency paths.
///
/// Duplicates, self-loops and cycles are all valid. Every edge target is a
/// node of the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.adjacency.contains_key(path)
    }

    pub fn dependencies(&self, path: &str) -> Option<&[String]> {
        self.adjacency.get(path).map(Vec::as_slice)
    }

    /// Files that import `path`, each listed once
    pub fn dependents(&self, path: &str) -> Vec<&str> {
        self.adjacency
            .iter()
            .filter(|(_, targets)| targets.iter().any(|t| t == path))
            .map(|(source, _)| source.as_str())
            .collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |target| (source.as_str(), target.as_str()))
        })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.adjacency
    }

    /// Directed petgraph view with one edge per import, parallel edges kept
    pub fn to_petgraph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.node_count());

        for node in self.nodes() {
            indices.insert(node, graph.add_node(node.to_string()));
        }
        for (source, target) in self.edges() {
            if let (Some(&s), Some(&t)) = (indices.get(source), indices.get(target)) {
                graph.add_edge(s, t, ());
            }
        }

        graph
    }
}

pub struct GraphBuilder {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Add a node with no dependencies. Existing nodes keep their edges.
    pub fn add_node(&mut self, path: &str) {
        self.adjacency.entry(path.to_string()).or_default();
    }

    /// Append `source -> target`. Returns `None` when either end is unknown.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<usize> {
        if !self.adjacency.contains_key(target) {
            return None;
        }
        let targets = self.adjacency.get_mut(source)?;
        targets.push(target.to_string());
        Some(targets.len() - 1)
    }

    /// Extract, filter and resolve the imports of every file under `root`.
    ///
    /// `index` must already contain every file; resolution against a partial
    /// index would silently drop edges. Returns `None` if `cancel` fires.
    pub fn build_from_files(
        root: &Path,
        files: &[SourceFile],
        registry: &ExtractorRegistry,
        index: &ModuleIndex,
        cancel: &CancellationToken,
    ) -> Option<DependencyGraph> {
        let resolved: Vec<Option<Vec<String>>> = files
            .par_iter()
            .map(|file| {
                if cancel.is_cancelled() {
                    return None;
                }
                let local = registry.extract_local_imports(&root.join(&file.path), &file.language);
                Some(
                    local
                        .iter()
                        .filter_map(|import| index.resolve(import))
                        .map(str::to_string)
                        .collect(),
                )
            })
            .collect();

        if cancel.is_cancelled() {
            return None;
        }

        let mut builder = Self::new();
        for file in files {
            builder.add_node(&file.path);
        }
        for (file, targets) in files.iter().zip(resolved) {
            for target in targets? {
                if builder.add_edge(&file.path, &target).is_none() {
                    log::debug!("Dropping edge {} -> {} outside the scanned set", file.path, target);
                }
            }
        }

        Some(builder.build())
    }

    pub fn build(self) -> DependencyGraph {
        DependencyGraph {
            adjacency: self.adjacency,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
