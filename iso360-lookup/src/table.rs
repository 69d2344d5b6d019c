//! Title table parser.
//!
//! The table has no header row and rows vary in width. Column 0 is the
//! display name; a row matches a media id when any of its columns ends with
//! that id (columns often carry a title id prefix, e.g. `4D5307E6-1A2B3C4D`).

use std::path::Path;

use crate::error::LookupError;

/// A parsed title table.
#[derive(Debug, Clone, Default)]
pub struct GameNameTable {
    rows: Vec<Vec<String>>,
}

impl GameNameTable {
    /// Parse table text. Malformed rows are skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Skipping malformed title table row: {e}");
                    continue;
                }
            };
            let row: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
            if row.first().is_some_and(|name| !name.is_empty()) {
                rows.push(row);
            }
        }

        Self { rows }
    }

    /// Read and parse a table file.
    pub fn from_file(path: &Path) -> Result<Self, LookupError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Title of the first row with a column ending in `media_id`.
    pub fn find(&self, media_id: &str) -> Option<&str> {
        if media_id.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|row| row.iter().any(|col| col.ends_with(media_id)))
            .map(|row| row[0].as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
