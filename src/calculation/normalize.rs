//! Entry normalization.
//!
//! The first engine stage: turns one raw timesheet entry into a worked
//! interval in minutes, or a skip signal for sick/vacation/excluded
//! entries, or a validation issue for malformed entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    EntryIssue, ExceptionHandling, OvertimePolicy, SkipReason, TimesheetEntry,
};

/// A normalized worked interval for one entry.
///
/// The interval is modeled as `[start_minute, start_minute + net_minutes)`
/// on the 24-hour ring anchored at the entry date; break time is compressed
/// out of the tail of the shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    /// The entry's calendar date.
    pub date: NaiveDate,
    /// Shift start as minutes since midnight on the entry date.
    pub start_minute: i64,
    /// Gross shift duration in minutes (before break subtraction).
    pub gross_minutes: i64,
    /// Net worked minutes (gross minus breaks).
    pub net_minutes: i64,
    /// The entry was flagged as a holiday.
    pub is_holiday: bool,
    /// The entry's date falls on Saturday or Sunday.
    pub is_weekend: bool,
    /// The entry was flagged as an exception.
    pub is_exception: bool,
}

/// The outcome of normalizing one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The entry contributes worked time.
    Worked(NormalizedEntry),
    /// The entry contributes nothing and is reported with a reason.
    Skipped {
        /// The entry's calendar date.
        date: NaiveDate,
        /// Why the entry was skipped.
        reason: SkipReason,
    },
    /// The entry is malformed; it is skipped and the issue reported.
    Invalid(EntryIssue),
}

/// Normalizes one timesheet entry against a policy.
///
/// Sick and vacation entries are skipped and contribute zero worked time.
/// Entries flagged `is_exception` are skipped only when the policy's
/// exception handling is [`ExceptionHandling::Exclude`]; otherwise they
/// pass through tagged for downstream reporting. A break longer than the
/// gross duration is reported as an invalid entry.
///
/// # Example
///
/// ```
/// use overtime_engine::calculation::{normalize_entry, NormalizeOutcome};
/// # use overtime_engine::models::{ExceptionHandling, OvertimePolicy, TimesheetEntry};
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
///
/// match normalize_entry(&entry, &policy) {
///     NormalizeOutcome::Worked(norm) => assert_eq!(norm.net_minutes, 540),
///     other => panic!("expected Worked, got {:?}", other),
/// }
/// ```
pub fn normalize_entry(entry: &TimesheetEntry, policy: &OvertimePolicy) -> NormalizeOutcome {
    if entry.is_sick {
        return NormalizeOutcome::Skipped {
            date: entry.date,
            reason: SkipReason::Sick,
        };
    }
    if entry.is_vacation {
        return NormalizeOutcome::Skipped {
            date: entry.date,
            reason: SkipReason::Vacation,
        };
    }
    if entry.is_exception && policy.exception_handling == ExceptionHandling::Exclude {
        return NormalizeOutcome::Skipped {
            date: entry.date,
            reason: SkipReason::Exception,
        };
    }

    let gross_minutes = entry.gross_minutes();
    let break_minutes = i64::from(entry.break_minutes);
    if break_minutes > gross_minutes {
        return NormalizeOutcome::Invalid(EntryIssue {
            date: entry.date,
            field: "break_minutes".to_string(),
            message: format!(
                "break of {} min exceeds gross duration of {} min",
                break_minutes, gross_minutes
            ),
        });
    }

    NormalizeOutcome::Worked(NormalizedEntry {
        date: entry.date,
        start_minute: entry.start_minute(),
        gross_minutes,
        net_minutes: gross_minutes - break_minutes,
        is_holiday: entry.is_holiday,
        is_weekend: entry.is_weekend(),
        is_exception: entry.is_exception,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExceptionHandling;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_policy(exception_handling: ExceptionHandling) -> OvertimePolicy {
        OvertimePolicy {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            name: "standard".to_string(),
            threshold_hours: dec("8"),
            multiplier: dec("1.5"),
            daily_limit_hours: dec("2"),
            weekly_limit_hours: dec("10"),
            annual_limit_hours: dec("150"),
            day_multiplier: dec("1.5"),
            night_multiplier: dec("1.75"),
            weekend_multiplier: dec("2.0"),
            holiday_multiplier: dec("2.0"),
            night_start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            night_end_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            rounding_minutes: 15,
            exception_handling,
            is_active: true,
        }
    }

    fn make_entry(date: &str, start: &str, end: &str, break_minutes: u32) -> TimesheetEntry {
        TimesheetEntry {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            break_minutes,
            description: None,
            is_holiday: false,
            is_sick: false,
            is_vacation: false,
            is_exception: false,
        }
    }

    fn expect_worked(outcome: NormalizeOutcome) -> NormalizedEntry {
        match outcome {
            NormalizeOutcome::Worked(norm) => norm,
            other => panic!("expected Worked, got {:?}", other),
        }
    }

    /// EN-001: day shift with break
    #[test]
    fn test_en_001_day_shift_with_break() {
        let policy = make_policy(ExceptionHandling::Review);
        let entry = make_entry("2024-01-15", "09:00", "19:00", 60);

        let norm = expect_worked(normalize_entry(&entry, &policy));
        assert_eq!(norm.gross_minutes, 600);
        assert_eq!(norm.net_minutes, 540);
        assert_eq!(norm.start_minute, 540);
        assert!(!norm.is_weekend);
        assert!(!norm.is_holiday);
    }

    /// EN-002: sick entry is skipped
    #[test]
    fn test_en_002_sick_entry_skipped() {
        let policy = make_policy(ExceptionHandling::Review);
        let mut entry = make_entry("2024-01-15", "09:00", "19:00", 0);
        entry.is_sick = true;

        assert_eq!(
            normalize_entry(&entry, &policy),
            NormalizeOutcome::Skipped {
                date: entry.date,
                reason: SkipReason::Sick,
            }
        );
    }

    /// EN-003: vacation entry is skipped
    #[test]
    fn test_en_003_vacation_entry_skipped() {
        let policy = make_policy(ExceptionHandling::Review);
        let mut entry = make_entry("2024-01-15", "09:00", "19:00", 0);
        entry.is_vacation = true;

        assert_eq!(
            normalize_entry(&entry, &policy),
            NormalizeOutcome::Skipped {
                date: entry.date,
                reason: SkipReason::Vacation,
            }
        );
    }

    /// EN-004: break exceeding gross duration is invalid
    #[test]
    fn test_en_004_break_exceeding_gross_is_invalid() {
        let policy = make_policy(ExceptionHandling::Review);
        let entry = make_entry("2024-01-15", "09:00", "10:00", 120);

        match normalize_entry(&entry, &policy) {
            NormalizeOutcome::Invalid(issue) => {
                assert_eq!(issue.field, "break_minutes");
                assert_eq!(issue.date, entry.date);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    /// EN-005: midnight-crossing shift
    #[test]
    fn test_en_005_midnight_crossing_shift() {
        let policy = make_policy(ExceptionHandling::Review);
        let entry = make_entry("2024-01-15", "22:00", "06:00", 30);

        let norm = expect_worked(normalize_entry(&entry, &policy));
        assert_eq!(norm.gross_minutes, 480);
        assert_eq!(norm.net_minutes, 450);
        assert_eq!(norm.start_minute, 1320);
    }

    /// EN-006: exception excluded under Exclude mode
    #[test]
    fn test_en_006_exception_excluded() {
        let policy = make_policy(ExceptionHandling::Exclude);
        let mut entry = make_entry("2024-01-15", "09:00", "19:00", 0);
        entry.is_exception = true;

        assert_eq!(
            normalize_entry(&entry, &policy),
            NormalizeOutcome::Skipped {
                date: entry.date,
                reason: SkipReason::Exception,
            }
        );
    }

    /// EN-007: exception passes through tagged under Include and Review
    #[test]
    fn test_en_007_exception_passes_through_tagged() {
        for mode in [ExceptionHandling::Include, ExceptionHandling::Review] {
            let policy = make_policy(mode);
            let mut entry = make_entry("2024-01-15", "09:00", "19:00", 0);
            entry.is_exception = true;

            let norm = expect_worked(normalize_entry(&entry, &policy));
            assert!(norm.is_exception);
            assert_eq!(norm.net_minutes, 600);
        }
    }

    #[test]
    fn test_zero_duration_entry_is_worked() {
        let policy = make_policy(ExceptionHandling::Review);
        let entry = make_entry("2024-01-15", "09:00", "09:00", 0);

        let norm = expect_worked(normalize_entry(&entry, &policy));
        assert_eq!(norm.net_minutes, 0);
    }

    #[test]
    fn test_break_equal_to_gross_is_valid() {
        let policy = make_policy(ExceptionHandling::Review);
        let entry = make_entry("2024-01-15", "09:00", "10:00", 60);

        let norm = expect_worked(normalize_entry(&entry, &policy));
        assert_eq!(norm.net_minutes, 0);
    }

    #[test]
    fn test_sick_takes_precedence_over_exception() {
        let policy = make_policy(ExceptionHandling::Exclude);
        let mut entry = make_entry("2024-01-15", "09:00", "19:00", 0);
        entry.is_sick = true;
        entry.is_exception = true;

        assert_eq!(
            normalize_entry(&entry, &policy),
            NormalizeOutcome::Skipped {
                date: entry.date,
                reason: SkipReason::Sick,
            }
        );
    }

    #[test]
    fn test_weekend_entry_tagged() {
        let policy = make_policy(ExceptionHandling::Review);
        // 2024-01-13 is a Saturday
        let entry = make_entry("2024-01-13", "09:00", "17:00", 0);

        let norm = expect_worked(normalize_entry(&entry, &policy));
        assert!(norm.is_weekend);
    }
}
