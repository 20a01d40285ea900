use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::RepoIndex;

/// Serializes a [`RepoIndex`] in the shape handed to the API layer
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output for programmatic consumption
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format_to_file(&self, index: &RepoIndex, output_path: &Path) -> Result<()> {
        let json_content = self.format_index(index)?;
        fs::write(output_path, json_content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_index(&self, index: &RepoIndex) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(index)?
        } else {
            serde_json::to_string(index)?
        };
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
