use std::collections::HashMap;

use super::scanner::SourceFile;

/// Candidate module name to file path lookup.
///
/// Each file registers its stem (`user` for `app/models/user.py`) and its
/// dotted path (`app.models.user`). When two files claim the same key the
/// one registered first keeps it, so the outcome follows scan order.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    entries: HashMap<String, String>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn build(files: &[SourceFile]) -> Self {
        let mut index = Self::new();
        index.entries.reserve(files.len() * 2);
        for file in files {
            index.register_file(file);
        }
        index
    }

    pub fn register_file(&mut self, file: &SourceFile) {
        let stem = file.stem();
        self.register(stem, &file.path);

        let mut segments = file.dir_segments();
        segments.push(stem);
        self.register(&segments.join("."), &file.path);
    }

    /// Insert a key unless it is empty or already taken. Returns whether the
    /// key now points at `path` because of this call.
    pub fn register(&mut self, key: &str, path: &str) -> bool {
        if key.is_empty() || self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), path.to_string());
        true
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Map a local import string to an in-tree path.
    ///
    /// Tries the raw string, then the string without leading dots, then its
    /// last segment. Relative `./` and `../` targets are not joined with the
    /// importer's directory; they only resolve through the last segment.
    pub fn resolve(&self, import: &str) -> Option<&str> {
        self.lookup(import)
            .or_else(|| self.lookup(import.trim_start_matches('.')))
            .or_else(|| self.lookup(last_segment(import)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `app.models.user` -> `user`, `../lib/utils.js` -> `utils`
fn last_segment(import: &str) -> &str {
    match import.rsplit_once('/') {
        Some((_, name)) => match name.rfind('.') {
            Some(dot) if dot > 0 => &name[..dot],
            _ => name,
        },
        None => import.rsplit('.').next().unwrap_or(import),
    }
}
