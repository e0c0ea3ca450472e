use log::{error, info};
use std::path::Path;

use crate::types::{CategoryFile, UNKNOWN_CLASS};
use crate::utils::read_json;

/// Ordered class names; the position of a name is its label id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    names: Vec<String>,
}

impl CategoryTable {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Bounds-checked lookup; negative and out-of-range ids give `None`.
    pub fn resolve(&self, label_id: i64) -> Option<&str> {
        usize::try_from(label_id)
            .ok()
            .and_then(|idx| self.names.get(idx))
            .map(String::as_str)
    }

    /// Like [`resolve`](Self::resolve) but falls back to [`UNKNOWN_CLASS`].
    pub fn class_name(&self, label_id: i64) -> &str {
        self.resolve(label_id).unwrap_or(UNKNOWN_CLASS)
    }
}

impl From<Vec<String>> for CategoryTable {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

/// Build the category table from one sample annotation file.
///
/// A file without a readable `categories.label.labels` list is reported and
/// yields an empty table, so every label id later resolves to "Unknown".
pub fn extract_categories(sample_path: &Path) -> CategoryTable {
    match read_json::<CategoryFile>(sample_path) {
        Ok(file) => {
            let table: CategoryTable = file
                .categories
                .label
                .labels
                .into_iter()
                .map(|entry| entry.name)
                .collect::<Vec<_>>()
                .into();
            info!("Detected {} categories: {:?}", table.len(), table.names());
            table
        }
        Err(e) => {
            error!(
                "Error extracting categories from {}: {}",
                sample_path.display(),
                e
            );
            CategoryTable::default()
        }
    }
}
