//! Configuration for importers.

use crate::csv_importer::{CsvImporter, LotRecord};
use crate::ImportResult;
use anyhow::Result;
use std::path::Path;

/// Configuration for reading lot files.
///
/// Columns are read by position: asset, date, description, quantity, value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImporterConfig {
    /// The date format (strftime-style).
    pub date_format: String,
    /// The field delimiter.
    pub delimiter: char,
    /// Whether the file starts with a header row.
    pub has_header: bool,
    /// Number of data rows to skip after the header.
    pub skip_rows: usize,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            delimiter: ',',
            has_header: true,
            skip_rows: 0,
        }
    }
}

impl ImporterConfig {
    /// Start building a CSV importer configuration.
    pub fn csv() -> CsvConfigBuilder {
        CsvConfigBuilder::new()
    }

    /// Read lots from a file.
    pub fn extract<T: LotRecord>(&self, path: &Path) -> Result<ImportResult<T>> {
        CsvImporter::new(self.clone()).extract_file(path)
    }

    /// Read lots from string content.
    pub fn extract_from_string<T: LotRecord>(&self, content: &str) -> Result<ImportResult<T>> {
        CsvImporter::new(self.clone()).extract_string(content)
    }
}

/// Builder for CSV importer configuration.
#[derive(Debug, Clone, Default)]
pub struct CsvConfigBuilder {
    config: ImporterConfig,
}

impl CsvConfigBuilder {
    /// Create a new CSV config builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date format (strftime-style).
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Set the field delimiter.
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set whether the file has a header row.
    pub const fn has_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Set the number of data rows to skip.
    pub const fn skip_rows(mut self, count: usize) -> Self {
        self.config.skip_rows = count;
        self
    }

    /// Build the importer configuration.
    pub fn build(self) -> ImporterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImporterConfig::csv().build();
        assert_eq!(config, ImporterConfig::default());
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.delimiter, ',');
        assert!(config.has_header);
        assert_eq!(config.skip_rows, 0);
    }

    #[test]
    fn test_builder() {
        let config = ImporterConfig::csv()
            .date_format("%m/%d/%Y")
            .delimiter(';')
            .has_header(false)
            .skip_rows(2)
            .build();

        assert_eq!(config.date_format, "%m/%d/%Y");
        assert_eq!(config.delimiter, ';');
        assert!(!config.has_header);
        assert_eq!(config.skip_rows, 2);
    }
}
