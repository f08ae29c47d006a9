//! Configuration types for overtime policies.
//!
//! This module contains the serde shape deserialized from policy YAML
//! files and its conversion into the domain [`OvertimePolicy`].

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{ExceptionHandling, OvertimePolicy};

/// The on-disk shape of one policy YAML file.
///
/// Differential multipliers are optional and default to the generic
/// `multiplier`; `exception_handling` defaults to review and `is_active`
/// to true. Ids default to the nil UUID for file-defined policies.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy identifier.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Owning user identifier.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Policy name; also the lookup key in the store.
    pub name: String,
    /// Daily regular-time threshold in hours.
    pub threshold_hours: Decimal,
    /// Generic overtime multiplier.
    pub multiplier: Decimal,
    /// Cap on billable overtime hours per day.
    pub daily_limit_hours: Decimal,
    /// Cap on billable overtime hours per ISO week.
    pub weekly_limit_hours: Decimal,
    /// Cap on billable overtime hours per calendar year.
    pub annual_limit_hours: Decimal,
    /// Multiplier for standard overtime; defaults to `multiplier`.
    #[serde(default)]
    pub day_multiplier: Option<Decimal>,
    /// Multiplier for night overtime; defaults to `multiplier`.
    #[serde(default)]
    pub night_multiplier: Option<Decimal>,
    /// Multiplier for weekend overtime; defaults to `multiplier`.
    #[serde(default)]
    pub weekend_multiplier: Option<Decimal>,
    /// Multiplier for holiday overtime; defaults to `multiplier`.
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

impl From<PolicyFile> for OvertimePolicy {
    fn from(file: PolicyFile) -> Self {
        let generic = file.multiplier;
        OvertimePolicy {
            id: file.id.unwrap_or(Uuid::nil()),
            user_id: file.user_id.unwrap_or(Uuid::nil()),
            name: file.name,
            threshold_hours: file.threshold_hours,
            multiplier: generic,
            daily_limit_hours: file.daily_limit_hours,
            weekly_limit_hours: file.weekly_limit_hours,
            annual_limit_hours: file.annual_limit_hours,
            day_multiplier: file.day_multiplier.unwrap_or(generic),
            night_multiplier: file.night_multiplier.unwrap_or(generic),
            weekend_multiplier: file.weekend_multiplier.unwrap_or(generic),
            holiday_multiplier: file.holiday_multiplier.unwrap_or(generic),
            night_start_time: file.night_start_time,
            night_end_time: file.night_end_time,
            rounding_minutes: file.rounding_minutes,
            exception_handling: file.exception_handling,
            is_active: file.is_active,
        }
    }
}
