//! Rounding and aggregation.
//!
//! The final engine stage: rounds each entry's overtime total to the
//! policy increment and sums per-entry rows into run-level totals. Limits
//! are never re-applied here; clipping happens once, at the minute level,
//! in the accumulator.
//!
//! The tie-break is round-half-up: a value exactly between two multiples
//! rounds to the larger one. Rounding an already-rounded value is a no-op.

use rust_decimal::Decimal;

use crate::models::{CategoryMinutes, CategoryWeighted, EntryBreakdown, OvertimeTotals};

use super::classify::DiffCategory;

/// Rounds a minute quantity to the nearest multiple of `increment`.
///
/// Ties round up. An increment of zero disables rounding. Negative inputs
/// are clamped to zero (overtime quantities are never negative).
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::round_to_increment;
///
/// assert_eq!(round_to_increment(60, 15), 60);   // already a multiple
/// assert_eq!(round_to_increment(52, 15), 45);   // down to nearest
/// assert_eq!(round_to_increment(53, 15), 60);   // up to nearest
/// assert_eq!(round_to_increment(45, 10), 50);   // tie rounds up
/// assert_eq!(round_to_increment(52, 0), 52);    // disabled
/// ```
pub fn round_to_increment(minutes: i64, increment: u32) -> i64 {
    let minutes = minutes.max(0);
    if increment == 0 {
        return minutes;
    }
    let inc = i64::from(increment);
    // Half-up without floating point: floor((2m + inc) / 2inc) multiples.
    ((2 * minutes + inc) / (2 * inc)) * inc
}

/// Rounds an entry's overtime total and adjusts its category minutes.
///
/// The delta between the rounded and raw total lands at the tail of the
/// entry's categories in classification order: a positive delta is added to
/// the last category present, a negative delta is taken from the tail
/// walking backwards so no category goes below zero. The adjusted
/// categories sum exactly to the rounded total. Returns the rounded total.
pub fn apply_entry_rounding(
    categories: &mut CategoryMinutes,
    classification_order: &[DiffCategory],
    increment: u32,
) -> i64 {
    let raw = categories.total();
    let rounded = round_to_increment(raw, increment);
    let mut delta = rounded - raw;

    for category in classification_order.iter().rev() {
        if delta == 0 {
            break;
        }
        let slot = match category {
            DiffCategory::Standard => &mut categories.standard,
            DiffCategory::Night => &mut categories.night,
            DiffCategory::Weekend => &mut categories.weekend,
            DiffCategory::Holiday => &mut categories.holiday,
        };
        if delta > 0 {
            *slot += delta;
            delta = 0;
        } else {
            let take = (-delta).min(*slot);
            *slot -= take;
            delta += take;
        }
    }

    rounded
}

/// Aggregates per-entry rows and run-level weighted values into totals.
///
/// Limits are not re-applied; the rows already carry capped, rounded
/// quantities.
pub fn aggregate_totals(
    entries: &[EntryBreakdown],
    category_weighted: CategoryWeighted,
) -> OvertimeTotals {
    let mut category_minutes = CategoryMinutes::default();
    let mut regular_minutes = 0;
    let mut overtime_minutes = 0;

    for entry in entries {
        regular_minutes += entry.regular_minutes;
        overtime_minutes += entry.overtime_minutes;
        category_minutes.accumulate(&entry.category_minutes);
    }

    OvertimeTotals {
        total_overtime_hours: Decimal::from(overtime_minutes) / Decimal::new(60, 0),
        regular_minutes,
        overtime_minutes,
        category_minutes,
        weighted_overtime: category_weighted.total(),
        category_weighted,
    }
}
