pub mod common;
pub mod javascript;
pub mod python;

use std::collections::HashMap;
use std::path::Path;

use crate::config::{AnalysisConfig, DEFAULT_CONFIG};

/// Lexical import rules for one family of languages
pub trait ImportExtractor {
    /// Raw import targets in order of appearance, duplicates kept
    fn extract_imports(&self, source: &str) -> Vec<String>;

    /// Heuristic in-tree test for a raw import target
    fn is_local(&self, import: &str) -> bool;

    fn language_name(&self) -> &str;
}

/// Language tag to extractor lookup. Tags without an entry yield no imports.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Box<dyn ImportExtractor + Send + Sync>>,
}

impl ExtractorRegistry {
    /// Registry with no languages registered
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        Self::with_config(&DEFAULT_CONFIG)
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(
            "python",
            python::PythonExtractor::new(config.python_external_roots.clone()),
        );
        for language in ["javascript", "typescript"] {
            registry.register(
                language,
                javascript::JavaScriptExtractor::new(config.js_local_prefixes.clone()),
            );
        }
        registry
    }

    pub fn register<E>(&mut self, language: &str, extractor: E)
    where
        E: ImportExtractor + Send + Sync + 'static,
    {
        log::debug!("Registering {} rules for '{}'", extractor.language_name(), language);
        self.extractors
            .insert(language.to_string(), Box::new(extractor));
    }

    pub fn get(&self, language: &str) -> Option<&(dyn ImportExtractor + Send + Sync)> {
        self.extractors.get(language).map(|e| e.as_ref())
    }

    pub fn supports(&self, language: &str) -> bool {
        self.extractors.contains_key(language)
    }

    /// Raw imports of one file. Unreadable files and unsupported languages
    /// produce an empty list.
    pub fn extract_file_imports(&self, file_path: &Path, language: &str) -> Vec<String> {
        let Some(extractor) = self.get(language) else {
            return Vec::new();
        };
        match common::read_source_lossy(file_path) {
            Some(source) => extractor.extract_imports(&source),
            None => Vec::new(),
        }
    }

    /// Raw imports of one file that pass the locality filter
    pub fn extract_local_imports(&self, file_path: &Path, language: &str) -> Vec<String> {
        let Some(extractor) = self.get(language) else {
            return Vec::new();
        };
        self.extract_file_imports(file_path, language)
            .into_iter()
            .filter(|import| extractor.is_local(import))
            .collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
