//! Request types for the Overtime Extraction Engine API.
//!
//! This module defines the JSON request structures for the `/extract`
//! endpoint.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ExceptionHandling, OvertimePolicy, TimesheetEntry};

/// Request body for the `/extract` endpoint.
///
/// Carries the timesheet entries and either an inline policy object or the
/// name of a policy loaded in the server's policy store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// The policy to apply: a store name or an inline definition.
    pub policy: PolicySelector,
    /// The timesheet entries to process.
    pub entries: Vec<EntryRequest>,
}

/// Selects the policy for an extraction request.
///
/// Serialized untagged: `"policy": "standard"` resolves against the policy
/// store, `"policy": { ... }` supplies the policy inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicySelector {
    /// The name of a policy in the server's store.
    Name(String),
    /// A complete inline policy definition.
    Inline(PolicyRequest),
}

/// Inline policy information in an extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRequest {
    /// Policy identifier.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Owning user identifier.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Policy name, used in error messages.
    pub name: String,
    /// Daily regular-time threshold in hours.
    pub threshold_hours: Decimal,
    /// Generic overtime multiplier, the default for omitted differential
    /// multipliers.
    pub multiplier: Decimal,
    /// Cap on billable overtime hours per day.
    pub daily_limit_hours: Decimal,
    /// Cap on billable overtime hours per ISO week.
    pub weekly_limit_hours: Decimal,
    /// Cap on billable overtime hours per calendar year.
    pub annual_limit_hours: Decimal,
    /// Multiplier for standard overtime.
    #[serde(default)]
    pub day_multiplier: Option<Decimal>,
    /// Multiplier for night overtime.
    #[serde(default)]
    pub night_multiplier: Option<Decimal>,
    /// Multiplier for weekend overtime.
    #[serde(default)]
    pub weekend_multiplier: Option<Decimal>,
    /// Multiplier for holiday overtime.
    #[serde(default)]
    pub holiday_multiplier: Option<Decimal>,
    /// Start of the night window.
    pub night_start_time: NaiveTime,
    /// End of the night window.
    pub night_end_time: NaiveTime,
    /// Rounding granularity in minutes; zero disables rounding.
    #[serde(default)]
    pub rounding_minutes: u32,
    /// How exception-flagged entries are treated.
    #[serde(default)]
    pub exception_handling: ExceptionHandling,
    /// Whether the policy may be used.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Timesheet entry information in an extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    /// The calendar date of the entry.
    pub date: NaiveDate,
    /// The wall-clock start time.
    pub start_time: NaiveTime,
    /// The wall-clock end time; earlier than the start means the shift
    /// crosses midnight.
    pub end_time: NaiveTime,
    /// Unpaid break minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// The entry's date is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Sick day.
    #[serde(default)]
    pub is_sick: bool,
    /// Vacation day.
    #[serde(default)]
    pub is_vacation: bool,
    /// Flagged as an exception.
    #[serde(default)]
    pub is_exception: bool,
}

impl From<PolicyRequest> for OvertimePolicy {
    fn from(req: PolicyRequest) -> Self {
        let generic = req.multiplier;
        OvertimePolicy {
            id: req.id.unwrap_or(Uuid::nil()),
            user_id: req.user_id.unwrap_or(Uuid::nil()),
            name: req.name,
            threshold_hours: req.threshold_hours,
            multiplier: generic,
            daily_limit_hours: req.daily_limit_hours,
            weekly_limit_hours: req.weekly_limit_hours,
            annual_limit_hours: req.annual_limit_hours,
            day_multiplier: req.day_multiplier.unwrap_or(generic),
            night_multiplier: req.night_multiplier.unwrap_or(generic),
            weekend_multiplier: req.weekend_multiplier.unwrap_or(generic),
            holiday_multiplier: req.holiday_multiplier.unwrap_or(generic),
            night_start_time: req.night_start_time,
            night_end_time: req.night_end_time,
            rounding_minutes: req.rounding_minutes,
            exception_handling: req.exception_handling,
            is_active: req.is_active,
        }
    }
}

impl From<EntryRequest> for TimesheetEntry {
    fn from(req: EntryRequest) -> Self {
        TimesheetEntry {
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            break_minutes: req.break_minutes,
            description: req.description,
            is_holiday: req.is_holiday,
            is_sick: req.is_sick,
            is_vacation: req.is_vacation,
            is_exception: req.is_exception,
        }
    }
}
