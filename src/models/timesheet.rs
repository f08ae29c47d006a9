//! Timesheet entry model.
//!
//! This module defines the [`TimesheetEntry`] struct representing one raw
//! daily record as supplied by a caller (a timesheet UI or a batch payroll
//! job). Entries are read-only inputs to the engine.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Minutes in a full day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// One raw timesheet entry for a single calendar date.
///
/// The end time may be earlier than the start time, which is interpreted as
/// the shift crossing midnight. Break minutes are subtracted from the gross
/// duration by the normalizer.
///
/// # Example
///
/// ```
/// use overtime_engine::models::TimesheetEntry;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let entry = TimesheetEntry {
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     break_minutes: 60,
///     description: None,
///     is_holiday: false,
///     is_sick: false,
///     is_vacation: false,
///     is_exception: false,
/// };
/// assert_eq!(entry.gross_minutes(), 600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// The calendar date of the entry.
    pub date: NaiveDate,
    /// The wall-clock start time.
    pub start_time: NaiveTime,
    /// The wall-clock end time. Earlier than `start_time` means the shift
    /// crosses midnight.
    pub end_time: NaiveTime,
    /// Unpaid break minutes subtracted from the gross duration.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// The entry's date is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Sick day; contributes no worked time.
    #[serde(default)]
    pub is_sick: bool,
    /// Vacation day; contributes no worked time.
    #[serde(default)]
    pub is_vacation: bool,
    /// Flagged as an exception; treatment is a policy switch.
    #[serde(default)]
    pub is_exception: bool,
}

impl TimesheetEntry {
    /// Returns the start time as minutes since midnight.
    pub fn start_minute(&self) -> i64 {
        i64::from(self.start_time.hour()) * 60 + i64::from(self.start_time.minute())
    }

    /// Returns the end time as minutes since midnight.
    pub fn end_minute(&self) -> i64 {
        i64::from(self.end_time.hour()) * 60 + i64::from(self.end_time.minute())
    }

    /// Calculates the gross shift duration in minutes.
    ///
    /// An end time earlier than the start time wraps across midnight:
    /// `(1440 - start) + end`. Equal times are a zero-duration entry.
    ///
    /// # Example
    ///
    /// ```
    /// use overtime_engine::models::TimesheetEntry;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let entry = TimesheetEntry {
    ///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     break_minutes: 0,
    ///     description: None,
    ///     is_holiday: false,
    ///     is_sick: false,
    ///     is_vacation: false,
    ///     is_exception: false,
    /// };
    /// assert_eq!(entry.gross_minutes(), 480);
    /// ```
    pub fn gross_minutes(&self) -> i64 {
        let start = self.start_minute();
        let end = self.end_minute();
        if end < start {
            (MINUTES_PER_DAY - start) + end
        } else {
            end - start
        }
    }

    /// Returns true when the entry's date falls on Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}
