//! Core types for gainbook
//!
//! This crate provides the fundamental types used throughout the gainbook project:
//!
//! - [`Acquisition`] - A purchase lot: units bought at a total cost basis
//! - [`Disposal`] - A sale: units sold at a total fair market value
//! - [`Lot`] - Shared behavior of both, including proportional splitting
//! - [`GainOrLoss`] - One matched block of an acquisition against a disposal
//! - [`Term`] - Short or long holding period, see [`classify_term`]
//! - [`Method`] - How acquisitions are ordered before matching
//!
//! # Example
//!
//! ```
//! use gainbook_core::{Acquisition, Disposal, GainOrLoss, Lot, Term};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let bought = Acquisition::new("BTC", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), dec!(10), dec!(100));
//! let sold = Disposal::new("BTC", NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(), dec!(10), dec!(150));
//!
//! // Take 4 units out of the purchase lot
//! let (taken, remainder) = bought.split(dec!(4)).unwrap();
//! assert_eq!(taken.cost_basis, dec!(40));
//! assert_eq!(remainder.unwrap().cost_basis, dec!(60));
//!
//! let gain = GainOrLoss::realize(&bought, &sold).unwrap();
//! assert_eq!(gain.gain_or_loss, dec!(50));
//! assert_eq!(gain.term, Term::Short);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod gain;
pub mod lot;
pub mod method;
pub mod term;

pub use gain::GainOrLoss;
pub use lot::{Acquisition, Disposal, Lot, LotError, VALUE_SCALE};
pub use method::Method;
pub use term::{classify_term, one_year_after, Term};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
