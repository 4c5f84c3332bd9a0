//! CSV lot importer.

use crate::config::ImporterConfig;
use crate::ImportResult;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use gainbook_core::{Acquisition, Disposal, Lot};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Number of columns in a lot row.
const FIELD_COUNT: usize = 5;

/// A lot type that can be built from one CSV row.
pub trait LotRecord: Lot {
    /// Human readable name of the lot kind, used in messages.
    const KIND: &'static str;
    /// Name of the fifth column.
    const VALUE_COLUMN: &'static str;

    /// Build a lot from parsed fields.
    fn from_fields(
        asset: String,
        date: NaiveDate,
        description: String,
        units: Decimal,
        value: Decimal,
    ) -> Self;
}

impl LotRecord for Acquisition {
    const KIND: &'static str = "acquisition";
    const VALUE_COLUMN: &'static str = "cost basis";

    fn from_fields(
        asset: String,
        date: NaiveDate,
        description: String,
        units: Decimal,
        value: Decimal,
    ) -> Self {
        Self::new(asset, date, units, value).with_description(description)
    }
}

impl LotRecord for Disposal {
    const KIND: &'static str = "disposal";
    const VALUE_COLUMN: &'static str = "fair market value";

    fn from_fields(
        asset: String,
        date: NaiveDate,
        description: String,
        units: Decimal,
        value: Decimal,
    ) -> Self {
        Self::new(asset, date, units, value).with_description(description)
    }
}

/// CSV lot importer.
pub struct CsvImporter {
    config: ImporterConfig,
}

impl CsvImporter {
    /// Create a new CSV importer with the given configuration.
    pub const fn new(config: ImporterConfig) -> Self {
        Self { config }
    }

    /// Read lots from a file.
    pub fn extract_file<T: LotRecord>(&self, path: &Path) -> Result<ImportResult<T>> {
        let file =
            File::open(path).with_context(|| format!("failed to open file: {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        self.extract_string(&content)
            .with_context(|| format!("invalid {} file: {}", T::KIND, path.display()))
    }

    /// Read lots from string content.
    ///
    /// Rows are kept in file order. Any malformed row aborts the import.
    pub fn extract_string<T: LotRecord>(&self, content: &str) -> Result<ImportResult<T>> {
        if !self.config.delimiter.is_ascii() {
            bail!(
                "delimiter must be a single ASCII character, got '{}'",
                self.config.delimiter
            );
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.config.has_header)
            .delimiter(self.config.delimiter as u8)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        let mut assets: Vec<String> = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("row {}: unreadable CSV", row + 1))?;
            let line = record
                .position()
                .map_or(row as u64 + 1, csv::Position::line);

            if row < self.config.skip_rows {
                continue;
            }

            let Some(lot) = self
                .parse_row::<T>(&record)
                .with_context(|| format!("line {line}"))?
            else {
                continue;
            };

            if !assets.iter().any(|a| a == lot.asset()) {
                assets.push(lot.asset().to_string());
            }
            records.push(lot);
        }

        tracing::debug!(kind = T::KIND, count = records.len(), "imported lots");

        let mut result = ImportResult::new(records);
        if assets.len() > 1 {
            result = result.with_warning(format!(
                "{} file mixes assets: {}",
                T::KIND,
                assets.join(", ")
            ));
        }
        Ok(result)
    }

    fn parse_row<T: LotRecord>(&self, record: &csv::StringRecord) -> Result<Option<T>> {
        // Whitespace-only rows
        if record.iter().all(str::is_empty) {
            return Ok(None);
        }

        if record.len() != FIELD_COUNT {
            bail!(
                "expected {FIELD_COUNT} fields (asset, date, description, quantity, {}), found {}",
                T::VALUE_COLUMN,
                record.len()
            );
        }

        let asset = &record[0];
        if asset.is_empty() {
            bail!("missing asset");
        }

        let date_str = &record[1];
        let date = NaiveDate::parse_from_str(date_str, &self.config.date_format).with_context(
            || {
                format!(
                    "failed to parse date '{date_str}' with format '{}'",
                    self.config.date_format
                )
            },
        )?;

        let units = parse_decimal(&record[3]).context("invalid quantity")?;
        let value =
            parse_decimal(&record[4]).with_context(|| format!("invalid {}", T::VALUE_COLUMN))?;

        Ok(Some(T::from_fields(
            asset.to_string(),
            date,
            record[2].to_string(),
            units,
            value,
        )))
    }
}

/// Parse a decimal in plain or scientific notation.
fn parse_decimal(s: &str) -> Result<Decimal> {
    if s.is_empty() {
        bail!("empty number");
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .with_context(|| format!("'{s}' is not a number"))
}
