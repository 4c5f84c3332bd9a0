//! Lot matching engine.
//!
//! Consumes the heads of the acquisition and disposal queues one step at a
//! time. Each step matches `min(acquisition units, disposal units)` and emits
//! one [`GainOrLoss`]; whichever side had more units is split and its
//! remainder goes back to the front of its queue. Matching stops as soon as
//! either queue is empty. Anything left in the other queue is unmatched and is
//! returned separately instead of producing records.

use gainbook_core::{Acquisition, Disposal, GainOrLoss, Lot};
use rust_decimal::Decimal;
use std::collections::VecDeque;

use crate::error::{BookingError, Side};

/// Lots left over after one queue ran out.
///
/// At most one of the two lists is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unmatched {
    /// Acquisition lots (or remainders) never disposed of.
    pub acquisitions: Vec<Acquisition>,
    /// Disposals (or remainders) with no acquisition left to match.
    pub disposals: Vec<Disposal>,
}

impl Unmatched {
    /// Whether every unit on both sides was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acquisitions.is_empty() && self.disposals.is_empty()
    }

    /// Total acquired units that were never disposed of.
    #[must_use]
    pub fn acquired_units(&self) -> Decimal {
        self.acquisitions.iter().map(|a| a.num_units).sum()
    }

    /// Total disposed units that had no acquisition to match.
    #[must_use]
    pub fn disposed_units(&self) -> Decimal {
        self.disposals.iter().map(|d| d.num_units).sum()
    }
}

/// Result of matching two queues to exhaustion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// One record per match step, in step order.
    pub gains: Vec<GainOrLoss>,
    /// What was left when matching stopped.
    pub unmatched: Unmatched,
}

/// The matching engine as a lazy sequence of gain records.
///
/// Acquisitions are consumed in the order given; apply
/// [`order_acquisitions`](crate::order_acquisitions) first to use a method
/// other than FIFO. Disposals are always consumed in the order given.
///
/// The iterator yields `Err` at most once and then ends.
#[derive(Debug, Clone)]
pub struct Matcher {
    acquisitions: VecDeque<Acquisition>,
    disposals: VecDeque<Disposal>,
    steps: usize,
    failed: bool,
}

impl Matcher {
    /// Create a matcher over two queues.
    pub fn new(
        acquisitions: impl IntoIterator<Item = Acquisition>,
        disposals: impl IntoIterator<Item = Disposal>,
    ) -> Self {
        Self {
            acquisitions: acquisitions.into_iter().collect(),
            disposals: disposals.into_iter().collect(),
            steps: 0,
            failed: false,
        }
    }

    /// Number of records produced so far.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Run one match step.
    ///
    /// Returns `Ok(None)` once either queue is empty.
    pub fn step(&mut self) -> Result<Option<GainOrLoss>, BookingError> {
        let (acquisition, disposal) =
            match (self.acquisitions.pop_front(), self.disposals.pop_front()) {
                (Some(acquisition), Some(disposal)) => (acquisition, disposal),
                (acquisition, disposal) => {
                    // One side is exhausted; put the other head back
                    if let Some(acquisition) = acquisition {
                        self.acquisitions.push_front(acquisition);
                    }
                    if let Some(disposal) = disposal {
                        self.disposals.push_front(disposal);
                    }
                    return Ok(None);
                }
            };

        check_head(&acquisition, Side::Acquisition)?;
        check_head(&disposal, Side::Disposal)?;

        let gain = if disposal.num_units >= acquisition.num_units {
            // The acquisition is consumed whole
            let (disposed, remainder) = disposal.split(acquisition.num_units)?;
            if let Some(remainder) = remainder {
                self.disposals.push_front(remainder);
            }
            GainOrLoss::realize(&acquisition, &disposed)?
        } else {
            // The disposal is consumed whole
            let (acquired, remainder) = acquisition.split(disposal.num_units)?;
            if let Some(remainder) = remainder {
                self.acquisitions.push_front(remainder);
            }
            GainOrLoss::realize(&acquired, &disposal)?
        };

        self.steps += 1;
        tracing::debug!(
            step = self.steps,
            units = %gain.units,
            acquired = %gain.date_acquired,
            disposed = %gain.date_disposed,
            gain_or_loss = %gain.gain_or_loss,
            term = %gain.term,
            "matched lot"
        );

        Ok(Some(gain))
    }

    /// Consume the matcher and return whatever is left in the queues.
    #[must_use]
    pub fn into_unmatched(self) -> Unmatched {
        Unmatched {
            acquisitions: self.acquisitions.into(),
            disposals: self.disposals.into(),
        }
    }
}

impl Iterator for Matcher {
    type Item = Result<GainOrLoss, BookingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.step().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

/// Zero or negative units at the head of a queue means conservation was
/// broken somewhere upstream.
fn check_head<L: Lot>(lot: &L, side: Side) -> Result<(), BookingError> {
    if lot.units() > Decimal::ZERO {
        return Ok(());
    }
    Err(BookingError::DegenerateLot {
        side,
        asset: lot.asset().to_string(),
        date: lot.date(),
        units: lot.units(),
    })
}

/// Match acquisitions against disposals in the order given.
///
/// Leftover units on either side do not fail the match; they are returned in
/// [`MatchOutcome::unmatched`].
pub fn match_lots(
    acquisitions: Vec<Acquisition>,
    disposals: Vec<Disposal>,
) -> Result<MatchOutcome, BookingError> {
    let mut matcher = Matcher::new(acquisitions, disposals);
    let gains = matcher.by_ref().collect::<Result<Vec<_>, _>>()?;
    let unmatched = matcher.into_unmatched();

    if !unmatched.disposals.is_empty() {
        tracing::warn!(
            units = %unmatched.disposed_units(),
            lots = unmatched.disposals.len(),
            "disposed units have no matching acquisition"
        );
    }
    if !unmatched.acquisitions.is_empty() {
        tracing::debug!(
            units = %unmatched.acquired_units(),
            lots = unmatched.acquisitions.len(),
            "acquired units left unsold"
        );
    }

    Ok(MatchOutcome { gains, unmatched })
}
