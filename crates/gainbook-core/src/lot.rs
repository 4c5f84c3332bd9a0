//! Acquisition and disposal lots.
//!
//! An [`Acquisition`] is a purchase of some units of an asset at a total cost
//! basis. A [`Disposal`] is a sale of some units at a total fair market value.
//! Both are immutable: consuming part of a lot produces new values through
//! [`Lot::split`] instead of editing the original.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Decimal places kept on the value of a split-off block.
///
/// The taken part of a split is `units * per_unit_value` rounded to this
/// scale with banker's rounding; the remainder is the original value minus
/// the taken part. Values of realistic magnitude therefore split without any
/// loss, and per-unit prices that terminate within this scale are preserved
/// exactly.
pub const VALUE_SCALE: u32 = 12;

/// Errors raised by lot arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    /// A per-unit value was requested for a lot holding no units.
    #[error("lot of {asset} dated {date} has zero units")]
    ZeroUnits {
        /// Asset of the lot.
        asset: String,
        /// Date of the lot.
        date: NaiveDate,
    },

    /// The requested split size is not within `(0, units]`.
    #[error("cannot take {requested} units from a lot of {available} {asset}")]
    InvalidSplit {
        /// Asset of the lot.
        asset: String,
        /// Units requested.
        requested: Decimal,
        /// Units held by the lot.
        available: Decimal,
    },

    /// An acquisition block and a disposal block of different sizes were
    /// paired into one gain record.
    #[error("cannot pair {acquired} acquired units with {disposed} disposed units")]
    UnitMismatch {
        /// Units in the acquisition block.
        acquired: Decimal,
        /// Units in the disposal block.
        disposed: Decimal,
    },

    /// Decimal arithmetic overflowed while scaling a lot value.
    #[error("arithmetic overflow in a lot of {asset}")]
    Overflow {
        /// Asset of the lot.
        asset: String,
    },
}

/// Shared behavior of acquisition and disposal lots.
///
/// A lot is a number of units with a total value (cost basis for
/// acquisitions, fair market value for disposals). Splitting preserves the
/// per-unit value.
pub trait Lot: Clone {
    /// Asset symbol.
    fn asset(&self) -> &str;

    /// Date of the event.
    fn date(&self) -> NaiveDate;

    /// Number of units in the lot.
    fn units(&self) -> Decimal;

    /// Total value of the lot.
    fn value(&self) -> Decimal;

    /// Build a copy of this lot with different units and value.
    #[must_use]
    fn with_units_and_value(&self, units: Decimal, value: Decimal) -> Self;

    /// Value of a single unit.
    fn per_unit_value(&self) -> Result<Decimal, LotError> {
        self.value()
            .checked_div(self.units())
            .ok_or_else(|| LotError::ZeroUnits {
                asset: self.asset().to_string(),
                date: self.date(),
            })
    }

    /// Split `units` off the front of this lot.
    ///
    /// Returns the taken part and the remainder, if any. Taking the whole lot
    /// returns it unchanged with no remainder. The taken value is
    /// `units * per_unit_value` at [`VALUE_SCALE`]; the remainder receives the
    /// rest of the value, so both parts sum to the original value.
    fn split(&self, units: Decimal) -> Result<(Self, Option<Self>), LotError> {
        let available = self.units();
        if units <= Decimal::ZERO || units > available {
            return Err(LotError::InvalidSplit {
                asset: self.asset().to_string(),
                requested: units,
                available,
            });
        }

        if units == available {
            return Ok((self.clone(), None));
        }

        let overflow = || LotError::Overflow {
            asset: self.asset().to_string(),
        };
        let taken_value = units
            .checked_mul(self.per_unit_value()?)
            .ok_or_else(overflow)?
            .round_dp(VALUE_SCALE);
        let remaining_value = self.value().checked_sub(taken_value).ok_or_else(overflow)?;

        Ok((
            self.with_units_and_value(units, taken_value),
            Some(self.with_units_and_value(available - units, remaining_value)),
        ))
    }
}

/// A purchase lot.
///
/// # Examples
///
/// ```
/// use gainbook_core::{Acquisition, Lot};
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let lot = Acquisition::new("ETH", NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(), dec!(2), dec!(3000))
///     .with_description("Coinbase buy");
///
/// assert_eq!(lot.per_unit_value().unwrap(), dec!(1500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acquisition {
    /// Asset symbol.
    pub asset: String,
    /// Acquisition date.
    pub date: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Units acquired.
    pub num_units: Decimal,
    /// Total cost basis in USD.
    #[serde(rename = "costBasisUSD")]
    pub cost_basis: Decimal,
}

impl Acquisition {
    /// Create a new acquisition with an empty description.
    #[must_use]
    pub fn new(
        asset: impl Into<String>,
        date: NaiveDate,
        num_units: Decimal,
        cost_basis: Decimal,
    ) -> Self {
        Self {
            asset: asset.into(),
            date,
            description: String::new(),
            num_units,
            cost_basis,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Lot for Acquisition {
    fn asset(&self) -> &str {
        &self.asset
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn units(&self) -> Decimal {
        self.num_units
    }

    fn value(&self) -> Decimal {
        self.cost_basis
    }

    fn with_units_and_value(&self, units: Decimal, value: Decimal) -> Self {
        Self {
            asset: self.asset.clone(),
            date: self.date,
            description: self.description.clone(),
            num_units: units,
            cost_basis: value,
        }
    }
}

impl fmt::Display for Acquisition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bought {} {} for {} USD",
            self.date, self.num_units, self.asset, self.cost_basis
        )
    }
}

/// A sale event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disposal {
    /// Asset symbol.
    pub asset: String,
    /// Disposal date.
    pub date: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Units disposed.
    pub num_units: Decimal,
    /// Total fair market value in USD received for the units.
    #[serde(rename = "fairMarketValueUSD")]
    pub fair_market_value: Decimal,
}

impl Disposal {
    /// Create a new disposal with an empty description.
    #[must_use]
    pub fn new(
        asset: impl Into<String>,
        date: NaiveDate,
        num_units: Decimal,
        fair_market_value: Decimal,
    ) -> Self {
        Self {
            asset: asset.into(),
            date,
            description: String::new(),
            num_units,
            fair_market_value,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Lot for Disposal {
    fn asset(&self) -> &str {
        &self.asset
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn units(&self) -> Decimal {
        self.num_units
    }

    fn value(&self) -> Decimal {
        self.fair_market_value
    }

    fn with_units_and_value(&self, units: Decimal, value: Decimal) -> Self {
        Self {
            asset: self.asset.clone(),
            date: self.date,
            description: self.description.clone(),
            num_units: units,
            fair_market_value: value,
        }
    }
}

impl fmt::Display for Disposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sold {} {} for {} USD",
            self.date, self.num_units, self.asset, self.fair_market_value
        )
    }
}
