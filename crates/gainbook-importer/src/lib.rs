//! Lot import for gainbook
//!
//! This crate reads acquisition and disposal lots from delimited text files.
//!
//! # Overview
//!
//! Each row holds one lot with five columns in fixed order: asset, date,
//! description, quantity and a dollar value (cost basis for acquisitions,
//! fair market value for disposals). Rows are returned in file order, which
//! is the order the matching engine consumes them in.
//!
//! # Example
//!
//! ```rust,no_run
//! use gainbook_importer::{read_acquisitions, ImporterConfig};
//! use std::path::Path;
//!
//! let config = ImporterConfig::csv().date_format("%m/%d/%Y").build();
//! let result = read_acquisitions(Path::new("buys.csv"), &config)?;
//! for warning in &result.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! println!("{} acquisitions", result.records.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod csv_importer;

use anyhow::Result;
use gainbook_core::{Acquisition, Disposal};
use std::path::Path;

pub use config::{CsvConfigBuilder, ImporterConfig};
pub use csv_importer::{CsvImporter, LotRecord};

/// Result of an import operation.
#[derive(Debug, Clone)]
pub struct ImportResult<T> {
    /// The lots read, in file order.
    pub records: Vec<T>,
    /// Warnings encountered during import.
    pub warnings: Vec<String>,
}

impl<T> ImportResult<T> {
    /// Create a new import result.
    pub const fn new(records: Vec<T>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the result.
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Read acquisitions from a file.
pub fn read_acquisitions(
    path: &Path,
    config: &ImporterConfig,
) -> Result<ImportResult<Acquisition>> {
    config.extract(path)
}

/// Read disposals from a file.
pub fn read_disposals(path: &Path, config: &ImporterConfig) -> Result<ImportResult<Disposal>> {
    config.extract(path)
}

/// Read acquisitions from string content.
pub fn acquisitions_from_string(
    content: &str,
    config: &ImporterConfig,
) -> Result<ImportResult<Acquisition>> {
    config.extract_from_string(content)
}

/// Read disposals from string content.
pub fn disposals_from_string(
    content: &str,
    config: &ImporterConfig,
) -> Result<ImportResult<Disposal>> {
    config.extract_from_string(content)
}
