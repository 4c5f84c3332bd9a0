//! Holding-period classification.
//!
//! A gain is short-term when the asset was disposed of on or before the
//! one-year anniversary of its acquisition, and long-term afterwards.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holding period of a realized gain or loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Term {
    /// Held one year or less.
    Short,
    /// Held more than one year.
    Long,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "SHORT"),
            Self::Long => write!(f, "LONG"),
        }
    }
}

/// The same month and day one calendar year later.
///
/// A February 29 acquisition has no anniversary in the following year; it
/// rolls over to March 1, which is what a year-increment on a calendar with
/// day overflow produces.
#[must_use]
pub fn one_year_after(date: NaiveDate) -> NaiveDate {
    let year = date.year() + 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Classify the holding period between two dates.
///
/// The exact anniversary is still short-term.
///
/// ```
/// use gainbook_core::{classify_term, Term};
/// use chrono::NaiveDate;
///
/// let bought = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// assert_eq!(classify_term(bought, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), Term::Short);
/// assert_eq!(classify_term(bought, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()), Term::Long);
/// ```
#[must_use]
pub fn classify_term(date_acquired: NaiveDate, date_disposed: NaiveDate) -> Term {
    if date_disposed <= one_year_after(date_acquired) {
        Term::Short
    } else {
        Term::Long
    }
}
