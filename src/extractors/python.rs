use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::ImportExtractor;

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^import\s+([\w.]+)").expect("valid python import regex"));
static FROM_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^from\s+([\w.]+)\s+import").expect("valid python from-import regex")
});

/// Line-oriented `import x.y` / `from x.y import z` extraction
pub struct PythonExtractor {
    external_roots: HashSet<String>,
}

impl PythonExtractor {
    pub fn new(external_roots: HashSet<String>) -> Self {
        Self { external_roots }
    }
}

impl ImportExtractor for PythonExtractor {
    fn extract_imports(&self, source: &str) -> Vec<String> {
        let mut imports = Vec::new();

        for line in source.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }

            let captured = IMPORT_RE
                .captures(line)
                .or_else(|| FROM_IMPORT_RE.captures(line))
                .and_then(|caps| caps.get(1));

            if let Some(module) = captured {
                imports.push(module.as_str().to_string());
            }
        }

        imports
    }

    fn is_local(&self, import: &str) -> bool {
        if import.starts_with('.') {
            return true;
        }
        // Unknown bare names are assumed to live in the tree
        let root = import.split('.').next().unwrap_or(import);
        !self.external_roots.contains(root)
    }

    fn language_name(&self) -> &str {
        "python"
    }
}
