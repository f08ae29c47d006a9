//! Differential classification.
//!
//! The second engine stage: splits a normalized worked interval into
//! contiguous sub-intervals tagged with exactly one differential category.
//! The split covers the full net duration with no gaps and no overlaps.
//!
//! ## Precedence
//!
//! When multiple conditions apply to the same minute, the category with the
//! highest precedence wins: holiday > weekend > night > standard. A holiday
//! night shift is therefore classified holiday throughout, never stacked.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{MINUTES_PER_DAY, OvertimePolicy};

use super::normalize::NormalizedEntry;

/// The differential category of a classified sub-interval.
///
/// The category determines which policy multiplier applies to overtime
/// minutes inside the sub-interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffCategory {
    /// Weekday daytime work.
    Standard,
    /// Work inside the policy night window.
    Night,
    /// Work on a Saturday or Sunday.
    Weekend,
    /// Work on a holiday.
    Holiday,
}

impl DiffCategory {
    /// Returns the precedence rank of this category.
    ///
    /// Higher ranks win when multiple conditions apply to the same minute:
    /// holiday (3) > weekend (2) > night (1) > standard (0).
    pub fn precedence(&self) -> u8 {
        match self {
            DiffCategory::Standard => 0,
            DiffCategory::Night => 1,
            DiffCategory::Weekend => 2,
            DiffCategory::Holiday => 3,
        }
    }

    /// Returns the policy multiplier for this category.
    pub fn multiplier(&self, policy: &OvertimePolicy) -> Decimal {
        match self {
            DiffCategory::Standard => policy.day_multiplier,
            DiffCategory::Night => policy.night_multiplier,
            DiffCategory::Weekend => policy.weekend_multiplier,
            DiffCategory::Holiday => policy.holiday_multiplier,
        }
    }
}

impl std::fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffCategory::Standard => write!(f, "standard"),
            DiffCategory::Night => write!(f, "night"),
            DiffCategory::Weekend => write!(f, "weekend"),
            DiffCategory::Holiday => write!(f, "holiday"),
        }
    }
}

/// A contiguous sub-span of worked time tagged with one category.
///
/// Produced by the classifier and consumed immediately by the accumulator;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedInterval {
    /// The differential category of this sub-interval.
    pub category: DiffCategory,
    /// Offset in minutes from the start of the worked interval.
    pub start_offset: i64,
    /// Duration in minutes.
    pub minutes: i64,
}

/// The policy night window as minutes since midnight on a 24-hour ring.
///
/// An end at or before the start wraps the window across midnight, matching
/// wall-clock windows such as 22:00–07:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    start: i64,
    end: i64,
}

impl NightWindow {
    /// Builds the night window from a policy's wall-clock boundaries.
    pub fn from_policy(policy: &OvertimePolicy) -> Self {
        use chrono::Timelike;
        let start = i64::from(policy.night_start_time.hour()) * 60
            + i64::from(policy.night_start_time.minute());
        let mut end = i64::from(policy.night_end_time.hour()) * 60
            + i64::from(policy.night_end_time.minute());
        // Strictly earlier end wraps past midnight; equal boundaries are a
        // zero-length window, not a full day.
        if end < start {
            end += MINUTES_PER_DAY;
        }
        Self { start, end }
    }

    /// Returns the night segments of the absolute interval `[from, to)`.
    ///
    /// The interval is expressed in minutes from midnight of the anchor
    /// date and may extend past 1440 for midnight-crossing shifts. Window
    /// instances on the previous, same and next day are considered so a
    /// shift running past midnight still meets the following day's window.
    /// Segments are returned in chronological order and do not overlap.
    pub fn night_segments(&self, from: i64, to: i64) -> Vec<(i64, i64)> {
        let mut segments = Vec::new();
        if self.end == self.start || from >= to {
            return segments;
        }
        for day_offset in [-1i64, 0, 1] {
            let window_start = self.start + day_offset * MINUTES_PER_DAY;
            let window_end = self.end + day_offset * MINUTES_PER_DAY;
            let seg_start = from.max(window_start);
            let seg_end = to.min(window_end);
            if seg_start < seg_end {
                segments.push((seg_start, seg_end));
            }
        }
        segments
    }
}

/// Classifies a normalized worked interval into differential sub-intervals.
///
/// The sub-intervals cover the net worked duration exactly, in
/// chronological order. Holiday and weekend entries classify as a single
/// full-duration interval per the precedence rule; other entries are split
/// at the night window boundaries.
///
/// # Example
///
/// ```
/// use overtime_engine::calculation::{classify_entry, DiffCategory, NormalizedEntry};
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
/// // A 20:00–02:00 weekday shift against a 22:00–07:00 night window
/// let norm = NormalizedEntry {
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     start_minute: 1200,
///     gross_minutes: 360,
///     net_minutes: 360,
///     is_holiday: false,
///     is_weekend: false,
///     is_exception: false,
/// };
///
/// let intervals = classify_entry(&norm, &policy);
/// assert_eq!(intervals.len(), 2);
/// assert_eq!(intervals[0].category, DiffCategory::Standard);
/// assert_eq!(intervals[0].minutes, 120);
/// assert_eq!(intervals[1].category, DiffCategory::Night);
/// assert_eq!(intervals[1].minutes, 240);
/// ```
pub fn classify_entry(
    norm: &NormalizedEntry,
    policy: &OvertimePolicy,
) -> Vec<ClassifiedInterval> {
    if norm.net_minutes == 0 {
        return Vec::new();
    }

    // Holiday and weekend claim the whole interval per the precedence rule.
    if norm.is_holiday {
        return vec![ClassifiedInterval {
            category: DiffCategory::Holiday,
            start_offset: 0,
            minutes: norm.net_minutes,
        }];
    }
    if norm.is_weekend {
        return vec![ClassifiedInterval {
            category: DiffCategory::Weekend,
            start_offset: 0,
            minutes: norm.net_minutes,
        }];
    }

    let from = norm.start_minute;
    let to = norm.start_minute + norm.net_minutes;
    let window = NightWindow::from_policy(policy);
    let night = window.night_segments(from, to);

    let mut intervals = Vec::new();
    let mut cursor = from;
    for (seg_start, seg_end) in night {
        if cursor < seg_start {
            intervals.push(ClassifiedInterval {
                category: DiffCategory::Standard,
                start_offset: cursor - from,
                minutes: seg_start - cursor,
            });
        }
        intervals.push(ClassifiedInterval {
            category: DiffCategory::Night,
            start_offset: seg_start - from,
            minutes: seg_end - seg_start,
        });
        cursor = seg_end;
    }
    if cursor < to {
        intervals.push(ClassifiedInterval {
            category: DiffCategory::Standard,
            start_offset: cursor - from,
            minutes: to - cursor,
        });
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExceptionHandling;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_policy(night_start: &str, night_end: &str) -> OvertimePolicy {
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
            night_start_time: NaiveTime::parse_from_str(night_start, "%H:%M").unwrap(),
            night_end_time: NaiveTime::parse_from_str(night_end, "%H:%M").unwrap(),
            rounding_minutes: 15,
            exception_handling: ExceptionHandling::Review,
            is_active: true,
        }
    }

    fn make_norm(date: &str, start_minute: i64, net_minutes: i64) -> NormalizedEntry {
        NormalizedEntry {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_minute,
            gross_minutes: net_minutes,
            net_minutes,
            is_holiday: false,
            is_weekend: false,
            is_exception: false,
        }
    }

    fn coverage(intervals: &[ClassifiedInterval]) -> i64 {
        intervals.iter().map(|i| i.minutes).sum()
    }

    /// CL-001: precedence ranks are holiday > weekend > night > standard
    #[test]
    fn test_cl_001_precedence_order() {
        assert!(DiffCategory::Holiday.precedence() > DiffCategory::Weekend.precedence());
        assert!(DiffCategory::Weekend.precedence() > DiffCategory::Night.precedence());
        assert!(DiffCategory::Night.precedence() > DiffCategory::Standard.precedence());
    }

    /// CL-002: holiday claims the entire interval regardless of time of day
    #[test]
    fn test_cl_002_holiday_claims_whole_interval() {
        let policy = make_policy("22:00", "07:00");
        // Night shift on a holiday
        let mut norm = make_norm("2024-01-15", 1320, 480);
        norm.is_holiday = true;

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].category, DiffCategory::Holiday);
        assert_eq!(intervals[0].minutes, 480);
    }

    /// CL-003: weekend claims the entire interval when not a holiday
    #[test]
    fn test_cl_003_weekend_claims_whole_interval() {
        let policy = make_policy("22:00", "07:00");
        let mut norm = make_norm("2024-01-13", 540, 480);
        norm.is_weekend = true;

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].category, DiffCategory::Weekend);
    }

    /// CL-004: holiday wins over weekend
    #[test]
    fn test_cl_004_holiday_wins_over_weekend() {
        let policy = make_policy("22:00", "07:00");
        let mut norm = make_norm("2024-01-13", 540, 480);
        norm.is_weekend = true;
        norm.is_holiday = true;

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].category, DiffCategory::Holiday);
    }

    /// CL-005: daytime shift entirely outside the night window
    #[test]
    fn test_cl_005_daytime_shift_is_standard() {
        let policy = make_policy("22:00", "07:00");
        // 09:00 for 9 hours
        let norm = make_norm("2024-01-15", 540, 540);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].category, DiffCategory::Standard);
        assert_eq!(intervals[0].minutes, 540);
    }

    /// CL-006: evening shift split at the night window start
    #[test]
    fn test_cl_006_evening_shift_split_at_window_start() {
        let policy = make_policy("22:00", "07:00");
        // 20:00 to 02:00 (six hours across midnight)
        let norm = make_norm("2024-01-15", 1200, 360);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].category, DiffCategory::Standard);
        assert_eq!(intervals[0].start_offset, 0);
        assert_eq!(intervals[0].minutes, 120);
        assert_eq!(intervals[1].category, DiffCategory::Night);
        assert_eq!(intervals[1].start_offset, 120);
        assert_eq!(intervals[1].minutes, 240);
        assert_eq!(coverage(&intervals), 360);
    }

    /// CL-007: early-morning shift meets the previous day's window instance
    #[test]
    fn test_cl_007_early_morning_meets_previous_window() {
        let policy = make_policy("22:00", "07:00");
        // 05:00 to 09:00
        let norm = make_norm("2024-01-15", 300, 240);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].category, DiffCategory::Night);
        assert_eq!(intervals[0].minutes, 120);
        assert_eq!(intervals[1].category, DiffCategory::Standard);
        assert_eq!(intervals[1].minutes, 120);
    }

    /// CL-008: overnight shift fully inside a wrapping window
    #[test]
    fn test_cl_008_overnight_fully_inside_window() {
        let policy = make_policy("22:00", "07:00");
        // 23:00 to 06:00
        let norm = make_norm("2024-01-15", 1380, 420);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].category, DiffCategory::Night);
        assert_eq!(intervals[0].minutes, 420);
    }

    /// CL-009: non-wrapping window in the middle of a shift
    #[test]
    fn test_cl_009_non_wrapping_window_inside_shift() {
        let policy = make_policy("12:00", "14:00");
        // 09:00 to 17:00
        let norm = make_norm("2024-01-15", 540, 480);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 3);
        assert_eq!(intervals[0].category, DiffCategory::Standard);
        assert_eq!(intervals[0].minutes, 180);
        assert_eq!(intervals[1].category, DiffCategory::Night);
        assert_eq!(intervals[1].minutes, 120);
        assert_eq!(intervals[2].category, DiffCategory::Standard);
        assert_eq!(intervals[2].minutes, 180);
        assert_eq!(coverage(&intervals), 480);
    }

    /// CL-010: zero-length window classifies everything standard
    #[test]
    fn test_cl_010_zero_length_window() {
        let policy = make_policy("22:00", "22:00");
        let norm = make_norm("2024-01-15", 1200, 480);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].category, DiffCategory::Standard);
    }

    /// CL-011: zero-duration entry yields no intervals
    #[test]
    fn test_cl_011_zero_duration_entry() {
        let policy = make_policy("22:00", "07:00");
        let norm = make_norm("2024-01-15", 540, 0);

        assert!(classify_entry(&norm, &policy).is_empty());
    }

    #[test]
    fn test_coverage_has_no_gaps_or_overlaps() {
        let policy = make_policy("22:00", "07:00");
        let norm = make_norm("2024-01-15", 1200, 600);

        let intervals = classify_entry(&norm, &policy);
        assert_eq!(coverage(&intervals), 600);
        let mut cursor = 0;
        for interval in &intervals {
            assert_eq!(interval.start_offset, cursor);
            cursor += interval.minutes;
        }
        assert_eq!(cursor, 600);
    }

    #[test]
    fn test_multiplier_lookup() {
        let policy = make_policy("22:00", "07:00");
        assert_eq!(DiffCategory::Standard.multiplier(&policy), dec("1.5"));
        assert_eq!(DiffCategory::Night.multiplier(&policy), dec("1.75"));
        assert_eq!(DiffCategory::Weekend.multiplier(&policy), dec("2.0"));
        assert_eq!(DiffCategory::Holiday.multiplier(&policy), dec("2.0"));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", DiffCategory::Standard), "standard");
        assert_eq!(format!("{}", DiffCategory::Night), "night");
        assert_eq!(format!("{}", DiffCategory::Weekend), "weekend");
        assert_eq!(format!("{}", DiffCategory::Holiday), "holiday");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&DiffCategory::Night).unwrap();
        assert_eq!(json, "\"night\"");

        let deserialized: DiffCategory = serde_json::from_str("\"holiday\"").unwrap();
        assert_eq!(deserialized, DiffCategory::Holiday);
    }
}
