//! Result models for the Overtime Extraction Engine.
//!
//! This module contains the [`OvertimeResult`] type and its associated
//! structures capturing the per-entry breakdown, run-level totals, cap
//! saturation flags, skipped-entry reporting, and warnings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why an entry was skipped by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entry is a sick day.
    Sick,
    /// The entry is a vacation day.
    Vacation,
    /// The entry is an exception and the policy excludes exceptions.
    Exception,
}

/// Billable overtime minutes split by differential category.
///
/// # Example
///
/// ```
/// use overtime_engine::models::CategoryMinutes;
///
/// let minutes = CategoryMinutes {
///     standard: 60,
///     night: 30,
///     weekend: 0,
///     holiday: 0,
/// };
/// assert_eq!(minutes.total(), 90);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMinutes {
    /// Standard (weekday daytime) overtime minutes.
    pub standard: i64,
    /// Night-window overtime minutes.
    pub night: i64,
    /// Weekend overtime minutes.
    pub weekend: i64,
    /// Holiday overtime minutes.
    pub holiday: i64,
}

impl CategoryMinutes {
    /// Returns the sum across all categories.
    pub fn total(&self) -> i64 {
        self.standard + self.night + self.weekend + self.holiday
    }

    /// Adds another set of category minutes into this one.
    pub fn accumulate(&mut self, other: &CategoryMinutes) {
        self.standard += other.standard;
        self.night += other.night;
        self.weekend += other.weekend;
        self.holiday += other.holiday;
    }
}

/// Rate-weighted overtime value split by differential category.
///
/// Weighted values are billable minutes multiplied by the category's policy
/// multiplier. They feed downstream pay calculation and are kept separate
/// from the raw minute counts that drive rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeighted {
    /// Weighted standard overtime minutes.
    pub standard: Decimal,
    /// Weighted night overtime minutes.
    pub night: Decimal,
    /// Weighted weekend overtime minutes.
    pub weekend: Decimal,
    /// Weighted holiday overtime minutes.
    pub holiday: Decimal,
}

impl CategoryWeighted {
    /// Returns the sum across all categories.
    pub fn total(&self) -> Decimal {
        self.standard + self.night + self.weekend + self.holiday
    }

    /// Adds another set of weighted values into this one.
    pub fn accumulate(&mut self, other: &CategoryWeighted) {
        self.standard += other.standard;
        self.night += other.night;
        self.weekend += other.weekend;
        self.holiday += other.holiday;
    }
}

/// Flags recording which overtime caps were saturated during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaturationFlags {
    /// A daily cap clipped candidate overtime.
    pub daily: bool,
    /// A weekly cap clipped candidate overtime.
    pub weekly: bool,
    /// An annual cap clipped candidate overtime.
    pub annual: bool,
}

impl SaturationFlags {
    /// Merges another set of flags into this one.
    pub fn merge(&mut self, other: &SaturationFlags) {
        self.daily |= other.daily;
        self.weekly |= other.weekly;
        self.annual |= other.annual;
    }

    /// Returns true when any cap was saturated.
    pub fn any(&self) -> bool {
        self.daily || self.weekly || self.annual
    }
}

/// Per-entry outcome of an extraction run.
///
/// Skipped entries keep their row with zeroed quantities and a
/// [`SkipReason`], so a caller can render the full period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBreakdown {
    /// The entry's calendar date.
    pub date: NaiveDate,
    /// Net worked minutes after break subtraction.
    pub worked_minutes: i64,
    /// Minutes classified as regular time.
    pub regular_minutes: i64,
    /// Billable overtime minutes after caps and rounding.
    pub overtime_minutes: i64,
    /// Billable overtime minutes per category. The entry's rounding
    /// adjustment is applied at the tail category, so the categories sum
    /// to `overtime_minutes`.
    pub category_minutes: CategoryMinutes,
    /// Candidate overtime minutes excluded by saturated caps.
    pub excluded_minutes: i64,
    /// Rate-weighted overtime value for this entry.
    pub weighted_overtime: Decimal,
    /// The entry's date fell on a weekend.
    pub is_weekend: bool,
    /// The entry was flagged as a holiday.
    pub is_holiday: bool,
    /// The entry was flagged as an exception.
    pub is_exception: bool,
    /// Present when the entry was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl EntryBreakdown {
    /// Creates a zeroed breakdown row for a skipped entry.
    pub fn skipped(date: NaiveDate, reason: SkipReason, is_exception: bool) -> Self {
        Self {
            date,
            worked_minutes: 0,
            regular_minutes: 0,
            overtime_minutes: 0,
            category_minutes: CategoryMinutes::default(),
            excluded_minutes: 0,
            weighted_overtime: Decimal::ZERO,
            is_weekend: false,
            is_holiday: false,
            is_exception,
            skipped: Some(reason),
        }
    }
}

/// A per-entry validation problem reported alongside the result.
///
/// Invalid entries are skipped rather than failing the whole batch; each
/// issue carries enough context for a caller to surface a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryIssue {
    /// The date of the problematic entry.
    pub date: NaiveDate,
    /// The field that was invalid.
    pub field: String,
    /// A description of the problem.
    pub message: String,
}

/// A non-fatal warning generated during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// Run-level aggregated totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeTotals {
    /// Total billable overtime in fractional hours (rounded minutes ÷ 60).
    pub total_overtime_hours: Decimal,
    /// Total minutes classified as regular time.
    pub regular_minutes: i64,
    /// Total billable overtime minutes after rounding.
    pub overtime_minutes: i64,
    /// Billable overtime minutes per category, including per-entry
    /// rounding adjustments.
    pub category_minutes: CategoryMinutes,
    /// Rate-weighted overtime value per category.
    pub category_weighted: CategoryWeighted,
    /// Total rate-weighted overtime value.
    pub weighted_overtime: Decimal,
}

impl Default for OvertimeTotals {
    fn default() -> Self {
        Self {
            total_overtime_hours: Decimal::ZERO,
            regular_minutes: 0,
            overtime_minutes: 0,
            category_minutes: CategoryMinutes::default(),
            category_weighted: CategoryWeighted::default(),
            weighted_overtime: Decimal::ZERO,
        }
    }
}

/// The complete result of one extraction run.
///
/// Owned by the caller; the engine allocates a fresh result per call and
/// shares no state between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Per-entry breakdown rows, in processing order.
    pub entries: Vec<EntryBreakdown>,
    /// Run-level totals.
    pub totals: OvertimeTotals,
    /// Which caps were saturated during the run.
    pub saturation: SaturationFlags,
    /// Validation problems for entries that were skipped as invalid.
    pub issues: Vec<EntryIssue>,
    /// Non-fatal warnings.
    pub warnings: Vec<ResultWarning>,
}
