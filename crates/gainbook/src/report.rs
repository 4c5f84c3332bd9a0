//! Gains report rendering.
//!
//! Groups matched records by holding period and renders them as plain text
//! or JSON.

use anyhow::{Context, Result};
use gainbook_booking::MatchOutcome;
use gainbook_core::{GainOrLoss, Method, Term};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Records for one holding period and their summed gain or loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermBucket {
    /// Records in match order.
    pub records: Vec<GainOrLoss>,
    /// Sum of `gainOrLoss` over `records`.
    pub total: Decimal,
}

impl TermBucket {
    fn push(&mut self, record: GainOrLoss) -> Result<()> {
        self.total = self
            .total
            .checked_add(record.gain_or_loss)
            .context("total gain or loss overflowed")?;
        self.records.push(record);
        Ok(())
    }
}

/// Units left unmatched on either side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedSummary {
    /// Acquired units never disposed of.
    pub acquired_units: Decimal,
    /// Disposed units with no acquisition to match.
    pub disposed_units: Decimal,
}

impl UnmatchedSummary {
    /// Whether anything was left over.
    pub fn is_empty(&self) -> bool {
        self.acquired_units.is_zero() && self.disposed_units.is_zero()
    }
}

/// A complete gains report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GainsReport {
    /// Lot selection method used.
    pub method: Method,
    /// Short-term records.
    pub short_term: TermBucket,
    /// Long-term records.
    pub long_term: TermBucket,
    /// Leftover units.
    pub unmatched: UnmatchedSummary,
}

impl GainsReport {
    /// Bucket the records of a match outcome by term.
    pub fn new(method: Method, outcome: MatchOutcome) -> Result<Self> {
        let unmatched = UnmatchedSummary {
            acquired_units: outcome.unmatched.acquired_units(),
            disposed_units: outcome.unmatched.disposed_units(),
        };

        let mut short_term = TermBucket::default();
        let mut long_term = TermBucket::default();
        for record in outcome.gains {
            match record.term {
                Term::Short => short_term.push(record)?,
                Term::Long => long_term.push(record)?,
            }
        }

        Ok(Self {
            method,
            short_term,
            long_term,
            unmatched,
        })
    }

    /// Write the report as human-readable text.
    pub fn write_text<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "Method: {}", self.method)?;
        write_bucket(writer, "Short Term", &self.short_term)?;
        write_bucket(writer, "Long Term", &self.long_term)?;
        Ok(())
    }

    /// Write the report as a pretty-printed JSON object.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

fn write_bucket<W: Write>(writer: &mut W, title: &str, bucket: &TermBucket) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{title} Gains or Losses")?;

    if bucket.records.is_empty() {
        writeln!(writer, "  (none)")?;
    }
    for record in &bucket.records {
        writeln!(
            writer,
            "  {:<24} acquired {}  disposed {}  proceeds {:>14}  basis {:>14}  gain {:>14}",
            record.description,
            record.date_acquired,
            record.date_disposed,
            record.sales_price.to_string(),
            record.cost_basis.to_string(),
            record.gain_or_loss.to_string(),
        )?;
    }

    writeln!(
        writer,
        "Total {} gain or loss: {}",
        title.to_lowercase(),
        bucket.total
    )?;
    Ok(())
}
