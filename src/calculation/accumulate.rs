//! Threshold and limit accumulation.
//!
//! The third engine stage: converts classified minutes into regular and
//! overtime minutes while enforcing the daily, weekly and annual overtime
//! caps. The accumulator is an explicit value threaded through a fold over
//! chronologically sorted entries; each step returns the advanced
//! accumulator plus the interval's outcome, so a single step is testable in
//! isolation.
//!
//! Ordering is a contract: caps consume capacity in processing order, so
//! entries must arrive in ascending `(date, start_time)` order and
//! sub-intervals in classifier order. Reordering changes which minutes get
//! clipped when a cap is mid-exceeded.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{OvertimePolicy, SaturationFlags};

use super::classify::{ClassifiedInterval, DiffCategory};

/// Key identifying an ISO week: `(iso_year, week_number)`.
type WeekKey = (i32, u32);

/// The outcome of accumulating one classified interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalOutcome {
    /// The interval's differential category.
    pub category: DiffCategory,
    /// Minutes assigned as regular time.
    pub regular_minutes: i64,
    /// Candidate overtime minutes that survived all three caps.
    pub billable_minutes: i64,
    /// Candidate overtime minutes excluded by saturated caps.
    pub excluded_minutes: i64,
    /// Billable minutes weighted by the category multiplier.
    pub weighted: Decimal,
    /// Caps that clipped this interval's candidate overtime.
    pub saturation: SaturationFlags,
}

/// Running state for one extraction run.
///
/// Tracks regular minutes per day and billable overtime minutes per day,
/// per ISO week and per calendar year. Scoped to a single computation;
/// never shared across calls.
///
/// # Example
///
/// ```
/// use overtime_engine::calculation::{Accumulator, ClassifiedInterval, DiffCategory};
/// # use overtime_engine::models::{ExceptionHandling, OvertimePolicy};
/// # use chrono::{NaiveDate, NaiveTime};
/// # use rust_decimal::Decimal;
/// # use uuid::Uuid;
/// # let policy = OvertimePolicy {
/// #     id: Uuid::nil(),
/// #     user_id: Uuid::nil(),
/// #     name: "standard".to_string(),
/// #     threshold_hours: Decimal::new(8, 0),
/// #     multiplier: Decimal::new(15, 1),
/// #     daily_limit_hours: Decimal::new(2, 0),
/// #     weekly_limit_hours: Decimal::new(10, 0),
/// #     annual_limit_hours: Decimal::new(150, 0),
/// #     day_multiplier: Decimal::new(15, 1),
/// #     night_multiplier: Decimal::new(175, 2),
/// #     weekend_multiplier: Decimal::new(2, 0),
/// #     holiday_multiplier: Decimal::new(2, 0),
/// #     night_start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
/// #     night_end_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
/// #     rounding_minutes: 15,
/// #     exception_handling: ExceptionHandling::Review,
/// #     is_active: true,
/// # };
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let interval = ClassifiedInterval {
///     category: DiffCategory::Standard,
///     start_offset: 0,
///     minutes: 540,
/// };
///
/// let acc = Accumulator::new();
/// let (acc, outcome) = acc.apply(date, &interval, &policy);
/// assert_eq!(outcome.regular_minutes, 480);
/// assert_eq!(outcome.billable_minutes, 60);
/// assert_eq!(acc.overtime_for_day(date), 60);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    regular_by_day: HashMap<NaiveDate, i64>,
    overtime_by_day: HashMap<NaiveDate, i64>,
    overtime_by_week: HashMap<WeekKey, i64>,
    overtime_by_year: HashMap<i32, i64>,
}

impl Accumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates one classified interval, returning the advanced
    /// accumulator and the interval's outcome.
    ///
    /// Regular capacity for the day is consumed first; the remainder is
    /// candidate overtime, clipped against remaining daily, weekly and
    /// annual capacity in that order. Each cap that reduces the candidate
    /// sets its saturation flag. Ledgers advance by billable minutes only;
    /// excluded minutes never consume capacity.
    pub fn apply(
        mut self,
        date: NaiveDate,
        interval: &ClassifiedInterval,
        policy: &OvertimePolicy,
    ) -> (Self, IntervalOutcome) {
        let week = week_key(date);
        let year = date.year();

        let regular_so_far = self.regular_by_day.get(&date).copied().unwrap_or(0);
        let regular_capacity = (policy.threshold_minutes() - regular_so_far).max(0);
        let regular_minutes = interval.minutes.min(regular_capacity);
        let candidate = interval.minutes - regular_minutes;

        let daily_remaining = remaining(
            policy.daily_limit_minutes(),
            self.overtime_by_day.get(&date).copied().unwrap_or(0),
        );
        let weekly_remaining = remaining(
            policy.weekly_limit_minutes(),
            self.overtime_by_week.get(&week).copied().unwrap_or(0),
        );
        let annual_remaining = remaining(
            policy.annual_limit_minutes(),
            self.overtime_by_year.get(&year).copied().unwrap_or(0),
        );

        let mut billable = candidate;
        let mut saturation = SaturationFlags::default();
        if billable > daily_remaining {
            billable = daily_remaining;
            saturation.daily = true;
        }
        if billable > weekly_remaining {
            billable = weekly_remaining;
            saturation.weekly = true;
        }
        if billable > annual_remaining {
            billable = annual_remaining;
            saturation.annual = true;
        }
        let excluded_minutes = candidate - billable;

        let weighted = Decimal::from(billable) * interval.category.multiplier(policy);

        if regular_minutes > 0 {
            *self.regular_by_day.entry(date).or_insert(0) += regular_minutes;
        }
        if billable > 0 {
            *self.overtime_by_day.entry(date).or_insert(0) += billable;
            *self.overtime_by_week.entry(week).or_insert(0) += billable;
            *self.overtime_by_year.entry(year).or_insert(0) += billable;
        }

        let outcome = IntervalOutcome {
            category: interval.category,
            regular_minutes,
            billable_minutes: billable,
            excluded_minutes,
            weighted,
            saturation,
        };
        (self, outcome)
    }

    /// Returns the billable overtime minutes accumulated for a day.
    pub fn overtime_for_day(&self, date: NaiveDate) -> i64 {
        self.overtime_by_day.get(&date).copied().unwrap_or(0)
    }

    /// Returns the billable overtime minutes accumulated for a date's ISO
    /// week.
    pub fn overtime_for_week(&self, date: NaiveDate) -> i64 {
        self.overtime_by_week
            .get(&week_key(date))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the billable overtime minutes accumulated for a year.
    pub fn overtime_for_year(&self, year: i32) -> i64 {
        self.overtime_by_year.get(&year).copied().unwrap_or(0)
    }

    /// Returns the regular minutes accumulated for a day.
    pub fn regular_for_day(&self, date: NaiveDate) -> i64 {
        self.regular_by_day.get(&date).copied().unwrap_or(0)
    }
}

/// ISO week key for a date.
fn week_key(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

/// Remaining capacity under a cap given minutes already consumed.
fn remaining(limit: i64, consumed: i64) -> i64 {
    (limit - consumed).max(0)
}
