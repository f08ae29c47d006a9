//! Overtime policy model.
//!
//! This module defines the [`OvertimePolicy`] struct describing the rules
//! for a single overtime computation run, and the [`ExceptionHandling`]
//! switch governing entries flagged as exceptions.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// How timesheet entries flagged `is_exception` are treated.
///
/// Exception entries are never silently dropped; each mode tags them in the
/// per-entry breakdown, and `Review` additionally emits a run-level warning.
///
/// # Example
///
/// ```
/// use overtime_engine::models::ExceptionHandling;
///
/// let mode = ExceptionHandling::default();
/// assert_eq!(mode, ExceptionHandling::Review);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionHandling {
    /// Process the entry normally; tag it in the breakdown.
    Include,
    /// Skip the entry entirely, like sick or vacation days.
    Exclude,
    /// Process the entry normally, tag it, and emit a warning for review.
    #[default]
    Review,
}

/// The overtime policy governing one extraction run.
///
/// A policy carries the daily regular-time threshold, overtime caps at three
/// time scopes, differential multipliers for each category of overtime, the
/// night window boundaries, and the rounding granularity. Policies are
/// immutable inputs: the engine never mutates them and refuses to compute
/// when `is_active` is false.
///
/// # Example
///
/// ```
/// use overtime_engine::models::{ExceptionHandling, OvertimePolicy};
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let policy = OvertimePolicy {
///     id: Uuid::nil(),
///     user_id: Uuid::nil(),
///     name: "standard".to_string(),
///     threshold_hours: Decimal::new(8, 0),
///     multiplier: Decimal::new(15, 1),
///     daily_limit_hours: Decimal::new(2, 0),
///     weekly_limit_hours: Decimal::new(10, 0),
///     annual_limit_hours: Decimal::new(150, 0),
///     day_multiplier: Decimal::new(15, 1),
///     night_multiplier: Decimal::new(175, 2),
///     weekend_multiplier: Decimal::new(2, 0),
///     holiday_multiplier: Decimal::new(2, 0),
///     night_start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     night_end_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     rounding_minutes: 15,
///     exception_handling: ExceptionHandling::Review,
///     is_active: true,
/// };
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Unique identifier for the policy.
    pub id: Uuid,
    /// The user this policy belongs to.
    pub user_id: Uuid,
    /// Human-readable policy name.
    pub name: String,
    /// Daily regular-time threshold in hours. Worked time beyond this is
    /// candidate overtime.
    pub threshold_hours: Decimal,
    /// Generic overtime multiplier, used as the default for any
    /// differential multiplier a policy file omits.
    pub multiplier: Decimal,
    /// Cap on billable overtime hours per day.
    pub daily_limit_hours: Decimal,
    /// Cap on billable overtime hours per ISO week.
    pub weekly_limit_hours: Decimal,
    /// Cap on billable overtime hours per calendar year.
    pub annual_limit_hours: Decimal,
    /// Multiplier for standard (weekday daytime) overtime.
    pub day_multiplier: Decimal,
    /// Multiplier for overtime inside the night window.
    pub night_multiplier: Decimal,
    /// Multiplier for weekend overtime.
    pub weekend_multiplier: Decimal,
    /// Multiplier for holiday overtime.
    pub holiday_multiplier: Decimal,
    /// Start of the night window (wall clock).
    pub night_start_time: NaiveTime,
    /// End of the night window (wall clock). May be earlier than the start,
    /// in which case the window wraps across midnight.
    pub night_end_time: NaiveTime,
    /// Rounding granularity in minutes applied to each entry's overtime
    /// total. Zero disables rounding.
    pub rounding_minutes: u32,
    /// How entries flagged `is_exception` are treated.
    #[serde(default)]
    pub exception_handling: ExceptionHandling,
    /// Whether this policy may be used. The engine fails with
    /// `InactivePolicy` otherwise.
    pub is_active: bool,
}

impl OvertimePolicy {
    /// Validates the policy's field invariants.
    ///
    /// Hour and limit fields must be non-negative; the generic and all four
    /// differential multipliers must be strictly positive. The first
    /// violation found is returned as [`EngineError::InvalidPolicy`].
    ///
    /// Activity is checked separately by the engine so an inactive policy
    /// surfaces as `InactivePolicy` rather than a field error.
    pub fn validate(&self) -> EngineResult<()> {
        let non_negative = [
            ("threshold_hours", self.threshold_hours),
            ("daily_limit_hours", self.daily_limit_hours),
            ("weekly_limit_hours", self.weekly_limit_hours),
            ("annual_limit_hours", self.annual_limit_hours),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidPolicy {
                    field: field.to_string(),
                    message: format!("must be non-negative, got {}", value),
                });
            }
        }

        let positive = [
            ("multiplier", self.multiplier),
            ("day_multiplier", self.day_multiplier),
            ("night_multiplier", self.night_multiplier),
            ("weekend_multiplier", self.weekend_multiplier),
            ("holiday_multiplier", self.holiday_multiplier),
        ];
        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidPolicy {
                    field: field.to_string(),
                    message: format!("must be positive, got {}", value),
                });
            }
        }

        Ok(())
    }

    /// Returns the daily regular-time threshold in whole minutes.
    ///
    /// Fractional threshold hours are truncated to the minute.
    pub fn threshold_minutes(&self) -> i64 {
        to_minutes(self.threshold_hours)
    }

    /// Returns the daily overtime cap in whole minutes.
    pub fn daily_limit_minutes(&self) -> i64 {
        to_minutes(self.daily_limit_hours)
    }

    /// Returns the weekly overtime cap in whole minutes.
    pub fn weekly_limit_minutes(&self) -> i64 {
        to_minutes(self.weekly_limit_hours)
    }

    /// Returns the annual overtime cap in whole minutes.
    pub fn annual_limit_minutes(&self) -> i64 {
        to_minutes(self.annual_limit_hours)
    }
}

/// Converts an hour quantity to whole minutes, truncating sub-minute parts.
fn to_minutes(hours: Decimal) -> i64 {
    let minutes = hours * Decimal::new(60, 0);
    minutes.trunc().try_into().unwrap_or(i64::MAX)
}
