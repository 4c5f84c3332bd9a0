//! Lot matching engine for gainbook.
//!
//! This crate provides:
//! - Acquisition ordering for each [`Method`] ([`order_acquisitions`])
//! - The matching engine, lazy ([`Matcher`]) or eager ([`match_lots`])
//! - Pre-flight validation of input lots ([`validate_lots`])
//! - The top-level entry point [`book`]
//!
//! # Example
//!
//! ```
//! use gainbook_booking::book;
//! use gainbook_core::{Acquisition, Disposal, Method, NaiveDate};
//! use rust_decimal_macros::dec;
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2022, m, d).unwrap();
//! let acquisitions = vec![
//!     Acquisition::new("BTC", day(1, 1), dec!(1), dec!(10)),
//!     Acquisition::new("BTC", day(2, 1), dec!(1), dec!(30)),
//! ];
//! let disposals = vec![Disposal::new("BTC", day(6, 1), dec!(1), dec!(50))];
//!
//! // HIFO sells the 30 USD lot first
//! let outcome = book(acquisitions, disposals, Method::Hifo).unwrap();
//! assert_eq!(outcome.gains[0].gain_or_loss, dec!(20));
//! assert_eq!(outcome.unmatched.acquired_units(), dec!(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod ordering;

pub use engine::{match_lots, MatchOutcome, Matcher, Unmatched};
pub use error::{BookingError, Side};
pub use ordering::order_acquisitions;

use gainbook_core::{Acquisition, Disposal, Lot, Method};
use rust_decimal::Decimal;

/// Check that every lot can take part in matching.
///
/// Units must be strictly positive and values must not be negative.
pub fn validate_lots(
    acquisitions: &[Acquisition],
    disposals: &[Disposal],
) -> Result<(), BookingError> {
    for (index, lot) in acquisitions.iter().enumerate() {
        validate_lot(lot, Side::Acquisition, index)?;
    }
    for (index, lot) in disposals.iter().enumerate() {
        validate_lot(lot, Side::Disposal, index)?;
    }
    Ok(())
}

fn validate_lot<L: Lot>(lot: &L, side: Side, index: usize) -> Result<(), BookingError> {
    let reason = if lot.units() <= Decimal::ZERO {
        format!("units must be positive, got {}", lot.units())
    } else if lot.value().is_sign_negative() && !lot.value().is_zero() {
        format!("value must not be negative, got {}", lot.value())
    } else {
        return Ok(());
    };

    Err(BookingError::InvalidLot {
        side,
        index,
        asset: lot.asset().to_string(),
        date: lot.date(),
        reason,
    })
}

/// Compute realized gains and losses.
///
/// Validates the input, orders the acquisitions for `method` and matches them
/// against the disposals in their given order. Nothing is matched if
/// validation fails.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(method = %method, acquisitions = acquisitions.len(), disposals = disposals.len())
)]
pub fn book(
    acquisitions: Vec<Acquisition>,
    disposals: Vec<Disposal>,
    method: Method,
) -> Result<MatchOutcome, BookingError> {
    validate_lots(&acquisitions, &disposals)?;
    let ordered = order_acquisitions(acquisitions, method);
    match_lots(ordered, disposals)
}
