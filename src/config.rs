//! Immutable lookup tables that drive scanning, locality and pattern heuristics.
//!
//! The built-in tables live in [`DEFAULT_CONFIG`]. A TOML file may replace any
//! individual table; tables it leaves out keep their defaults.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Process-wide default tables, built once on first use.
pub static DEFAULT_CONFIG: Lazy<AnalysisConfig> = Lazy::new(AnalysisConfig::default);

const IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
    ".pytest_cache",
    ".mypy_cache",
    "coverage",
    ".next",
    "out",
];

const EXTENSIONS: &[(&str, &str)] = &[
    ("py", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("go", "go"),
    ("java", "java"),
    ("rb", "ruby"),
    ("php", "php"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("h", "c"),
    ("hpp", "cpp"),
    ("rs", "rust"),
    ("swift", "swift"),
    ("kt", "kotlin"),
    ("cs", "csharp"),
];

const PYTHON_EXTERNAL_ROOTS: &[&str] = &[
    "os",
    "sys",
    "json",
    "re",
    "pathlib",
    "typing",
    "fastapi",
    "django",
    "flask",
    "requests",
    "numpy",
    "pandas",
    "pydantic",
    "sqlalchemy",
    "asyncio",
    "abc",
    "collections",
    "dataclasses",
    "datetime",
    "enum",
    "functools",
    "itertools",
    "logging",
    "math",
    "shutil",
    "subprocess",
    "tempfile",
    "time",
    "unittest",
    "uuid",
    "pytest",
];

const JS_LOCAL_PREFIXES: &[&str] = &["./", "../", "@/"];

const PATTERNS: &[(&str, &[&str])] = &[
    (
        "authentication",
        &["auth", "login", "guard", "jwt", "session", "oauth"],
    ),
    (
        "database",
        &["db", "database", "sql", "mongo", "prisma", "sequelize", "mongoose"],
    ),
    (
        "api",
        &["api", "router", "controller", "endpoint", "graphql", "rest"],
    ),
    ("payment", &["stripe", "paypal", "billing", "payment"]),
    ("docker", &["docker", "compose", "container"]),
    (
        "ci_cd",
        &["github/workflows", "gitlab-ci", "jenkins", "circleci"],
    ),
];

/// A named keyword group for [`crate::heuristics::PatternDetector`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory names whose whole subtree is skipped
    pub ignore_dirs: HashSet<String>,
    /// File extension (without the dot) to language tag
    pub extensions: HashMap<String, String>,
    /// First dotted segments treated as external in Python imports
    pub python_external_roots: HashSet<String>,
    /// Prefixes that mark a JS/TS import as in-tree
    pub js_local_prefixes: Vec<String>,
    /// Ordered pattern categories
    pub patterns: Vec<PatternCategory>,
}

/// On-disk shape of a config override file. Every table is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    ignore_dirs: Option<Vec<String>>,
    extensions: Option<HashMap<String, String>>,
    python_external_roots: Option<Vec<String>>,
    js_local_prefixes: Option<Vec<String>>,
    patterns: Option<Vec<PatternCategory>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
            extensions: EXTENSIONS
                .iter()
                .map(|(ext, lang)| (ext.to_string(), lang.to_string()))
                .collect(),
            python_external_roots: PYTHON_EXTERNAL_ROOTS
                .iter()
                .map(|r| r.to_string())
                .collect(),
            js_local_prefixes: JS_LOCAL_PREFIXES.iter().map(|p| p.to_string()).collect(),
            patterns: PATTERNS
                .iter()
                .map(|(name, keywords)| PatternCategory {
                    name: name.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML override document on top of the defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(source).context("invalid repolens config")?;
        let mut config = Self::default();

        if let Some(dirs) = file.ignore_dirs {
            config.ignore_dirs = dirs.into_iter().collect();
        }
        if let Some(extensions) = file.extensions {
            config.extensions = extensions
                .into_iter()
                .map(|(ext, lang)| (ext.trim_start_matches('.').to_string(), lang.to_lowercase()))
                .collect();
        }
        if let Some(roots) = file.python_external_roots {
            config.python_external_roots = roots.into_iter().collect();
        }
        if let Some(prefixes) = file.js_local_prefixes {
            config.js_local_prefixes = prefixes;
        }
        if let Some(patterns) = file.patterns {
            config.patterns = merge_patterns(patterns);
        }

        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&source)
    }

    /// Language tag for an extension, `None` when the extension is not scanned
    pub fn language_for_extension(&self, extension: &str) -> Option<&str> {
        self.extensions.get(extension).map(String::as_str)
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }
}

/// Fold repeated category names into the first occurrence and lowercase
/// keywords, since paths are matched lowercased.
fn merge_patterns(patterns: Vec<PatternCategory>) -> Vec<PatternCategory> {
    let mut merged: Vec<PatternCategory> = Vec::with_capacity(patterns.len());

    for category in patterns {
        let keywords = category.keywords.iter().map(|k| k.to_lowercase());
        match merged.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => {
                for keyword in keywords {
                    if !existing.keywords.contains(&keyword) {
                        existing.keywords.push(keyword);
                    }
                }
            }
            None => merged.push(PatternCategory {
                name: category.name,
                keywords: keywords.collect(),
            }),
        }
    }

    merged
}
