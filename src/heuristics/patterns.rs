use crate::config::{AnalysisConfig, PatternCategory, DEFAULT_CONFIG};
use crate::core::{PatternFlags, SourceFile};

/// Keyword-substring scan over file paths. File contents are never read.
pub struct PatternDetector<'a> {
    categories: &'a [PatternCategory],
}

impl PatternDetector<'static> {
    pub fn new() -> Self {
        Self::with_config(&DEFAULT_CONFIG)
    }
}

impl Default for PatternDetector<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PatternDetector<'a> {
    pub fn with_config(config: &'a AnalysisConfig) -> Self {
        Self {
            categories: &config.patterns,
        }
    }

    pub fn detect(&self, files: &[SourceFile]) -> PatternFlags {
        self.detect_paths(files.iter().map(|f| f.path.as_str()))
    }

    /// Every category appears in the result; a category that matched once
    /// stays true.
    pub fn detect_paths<'p>(&self, paths: impl IntoIterator<Item = &'p str>) -> PatternFlags {
        let mut detected = vec![false; self.categories.len()];
        let mut remaining = self.categories.len();

        for path in paths {
            if remaining == 0 {
                break;
            }
            let path = path.to_lowercase();

            for (found, category) in detected.iter_mut().zip(self.categories) {
                if *found {
                    continue;
                }
                if category
                    .keywords
                    .iter()
                    .any(|keyword| path.contains(keyword.as_str()))
                {
                    *found = true;
                    remaining -= 1;
                }
            }
        }

        self.categories
            .iter()
            .zip(detected)
            .map(|(category, found)| (category.name.clone(), found))
            .collect()
    }
}
