use once_cell::sync::Lazy;
use regex::Regex;

use super::ImportExtractor;

static IMPORT_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).expect("valid js import regex")
});
static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"require\(['"]([^'"]+)['"]\)"#).expect("valid js require regex")
});

/// `import ... from '...'` and `require('...')` extraction, shared by
/// JavaScript and TypeScript
pub struct JavaScriptExtractor {
    local_prefixes: Vec<String>,
}

impl JavaScriptExtractor {
    pub fn new(local_prefixes: Vec<String>) -> Self {
        Self { local_prefixes }
    }
}

impl ImportExtractor for JavaScriptExtractor {
    fn extract_imports(&self, source: &str) -> Vec<String> {
        // All `import` matches come before all `require` matches
        [&*IMPORT_FROM_RE, &*REQUIRE_RE]
            .into_iter()
            .flat_map(|re| {
                re.captures_iter(source)
                    .filter_map(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .collect()
    }

    fn is_local(&self, import: &str) -> bool {
        self.local_prefixes
            .iter()
            .any(|prefix| import.starts_with(prefix.as_str()))
    }

    fn language_name(&self) -> &str {
        "javascript"
    }
}
