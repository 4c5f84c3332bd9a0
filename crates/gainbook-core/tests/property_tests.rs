//! Property-based tests for gainbook-core.
//!
//! These tests verify lot splitting and term classification invariants for
//! arbitrary inputs using proptest.
//!
//! Run with: cargo test -p gainbook-core --test `property_tests`

use chrono::{Days, NaiveDate};
use gainbook_core::{classify_term, one_year_after, Acquisition, Disposal, Lot, Term};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_units() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2030i32, 1u32..13u32, 1u32..29u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// A lot with a terminating per-unit price, plus a split point inside it.
fn arb_acquisition_and_split() -> impl Strategy<Value = (Acquisition, Decimal)> {
    (arb_units(), arb_price(), arb_date())
        .prop_flat_map(|(units, price, date)| {
            let lot = Acquisition::new("BTC", date, units, units * price);
            let max = units.mantissa();
            (Just(lot), 1i64..=i64::try_from(max).unwrap())
        })
        .prop_map(|(lot, n)| (lot, Decimal::new(n, 4)))
}

// ============================================================================
// Split Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Splitting never creates or destroys units or value
    #[test]
    fn prop_split_conserves_units_and_value((lot, take) in arb_acquisition_and_split()) {
        let (taken, remainder) = lot.split(take).unwrap();

        let remaining_units = remainder.as_ref().map_or(Decimal::ZERO, |r| r.num_units);
        let remaining_value = remainder.as_ref().map_or(Decimal::ZERO, |r| r.cost_basis);

        prop_assert_eq!(taken.num_units + remaining_units, lot.num_units);
        prop_assert_eq!(taken.cost_basis + remaining_value, lot.cost_basis);
    }

    /// Splitting preserves the per-unit price on both sides
    #[test]
    fn prop_split_preserves_per_unit_price((lot, take) in arb_acquisition_and_split()) {
        let per_unit = lot.per_unit_value().unwrap();
        let (taken, remainder) = lot.split(take).unwrap();

        prop_assert_eq!(taken.per_unit_value().unwrap(), per_unit);
        if let Some(remainder) = remainder {
            prop_assert_eq!(remainder.per_unit_value().unwrap(), per_unit);
        }
    }

    /// Only a whole-lot split leaves no remainder
    #[test]
    fn prop_split_remainder_iff_partial((lot, take) in arb_acquisition_and_split()) {
        let (_, remainder) = lot.split(take).unwrap();
        prop_assert_eq!(remainder.is_none(), take == lot.num_units);
    }

    /// Non-terminating per-unit prices still conserve total value
    #[test]
    fn prop_split_conserves_value_for_any_price(
        units in 2i64..1000i64,
        value in arb_price(),
        date in arb_date()
    ) {
        let lot = Disposal::new("ETH", date, Decimal::from(units), value);
        let (taken, remainder) = lot.split(Decimal::ONE).unwrap();
        let remainder = remainder.unwrap();

        prop_assert_eq!(taken.fair_market_value + remainder.fair_market_value, value);
    }
}

// ============================================================================
// Term Properties
// ============================================================================

proptest! {
    /// Everything up to the anniversary is short, everything after is long
    #[test]
    fn prop_term_boundary(acquired in arb_date(), offset in 0u64..800u64) {
        let disposed = acquired.checked_add_days(Days::new(offset)).unwrap();
        let expected = if disposed <= one_year_after(acquired) {
            Term::Short
        } else {
            Term::Long
        };
        prop_assert_eq!(classify_term(acquired, disposed), expected);
    }

    /// The anniversary always lies 365 or 366 days out
    #[test]
    fn prop_anniversary_distance(acquired in arb_date()) {
        let days = (one_year_after(acquired) - acquired).num_days();
        prop_assert!(days == 365 || days == 366);
    }
}
