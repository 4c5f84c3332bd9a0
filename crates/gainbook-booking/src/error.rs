//! Booking errors.

use gainbook_core::{LotError, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Which queue a lot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The acquisition queue.
    Acquisition,
    /// The disposal queue.
    Disposal,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquisition => write!(f, "acquisition"),
            Self::Disposal => write!(f, "disposal"),
        }
    }
}

/// Errors that can occur while booking disposals against acquisitions.
///
/// None of these are recoverable mid-computation: input problems are caught
/// before matching starts, anything else is a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// An input lot failed pre-flight validation.
    #[error("{side} #{index} ({asset} on {date}): {reason}")]
    InvalidLot {
        /// Queue the lot came from.
        side: Side,
        /// Zero-based position in the input sequence.
        index: usize,
        /// Asset of the lot.
        asset: String,
        /// Date of the lot.
        date: NaiveDate,
        /// What is wrong with it.
        reason: String,
    },

    /// A lot with no units reached the head of a queue.
    #[error("{side} of {asset} on {date} reached matching with {units} units")]
    DegenerateLot {
        /// Queue the lot is in.
        side: Side,
        /// Asset of the lot.
        asset: String,
        /// Date of the lot.
        date: NaiveDate,
        /// Units it holds.
        units: Decimal,
    },

    /// Lot arithmetic failed.
    #[error(transparent)]
    Lot(#[from] LotError),
}
