//! Realized gain or loss records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lot::{Acquisition, Disposal, LotError};
use crate::term::{classify_term, Term};

/// The realized result of matching one block of acquired units against the
/// same number of disposed units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GainOrLoss {
    /// Asset symbol, taken from the disposal.
    pub asset: String,
    /// `"<units> <asset>"`, the line description used on tax forms.
    pub description: String,
    /// Size of the matched block.
    pub units: Decimal,
    /// Date the block was acquired.
    pub date_acquired: NaiveDate,
    /// Date the block was disposed of.
    pub date_disposed: NaiveDate,
    /// Proceeds attributable to the block.
    pub sales_price: Decimal,
    /// Cost basis attributable to the block.
    pub cost_basis: Decimal,
    /// `sales_price - cost_basis`.
    pub gain_or_loss: Decimal,
    /// Holding period.
    pub term: Term,
}

impl GainOrLoss {
    /// Build a record from an acquisition block and a disposal block of the
    /// same size.
    pub fn realize(acquired: &Acquisition, disposed: &Disposal) -> Result<Self, LotError> {
        if acquired.num_units != disposed.num_units {
            return Err(LotError::UnitMismatch {
                acquired: acquired.num_units,
                disposed: disposed.num_units,
            });
        }

        let gain_or_loss = disposed
            .fair_market_value
            .checked_sub(acquired.cost_basis)
            .ok_or_else(|| LotError::Overflow {
                asset: disposed.asset.clone(),
            })?;

        Ok(Self {
            asset: disposed.asset.clone(),
            description: format!("{} {}", disposed.num_units, disposed.asset),
            units: disposed.num_units,
            date_acquired: acquired.date,
            date_disposed: disposed.date,
            sales_price: disposed.fair_market_value,
            cost_basis: acquired.cost_basis,
            gain_or_loss,
            term: classify_term(acquired.date, disposed.date),
        })
    }

    /// Whether this record is a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.gain_or_loss.is_sign_negative() && !self.gain_or_loss.is_zero()
    }
}

impl fmt::Display for GainOrLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {} -> {}  proceeds {}  basis {}  gain {}  {}",
            self.description,
            self.date_acquired,
            self.date_disposed,
            self.sales_price,
            self.cost_basis,
            self.gain_or_loss,
            self.term
        )
    }
}
