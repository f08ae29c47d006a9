//! The overtime extraction operation.
//!
//! Ties the four stages together: normalize each entry, classify the
//! worked interval, fold the classified intervals through the accumulator,
//! round per entry, and aggregate totals. Pure and synchronous; the
//! accumulator is scoped to one call and nothing is shared between calls.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CategoryMinutes, CategoryWeighted, EntryBreakdown, ExceptionHandling, OvertimePolicy,
    OvertimeResult, ResultWarning, SaturationFlags, SkipReason, TimesheetEntry,
};

use super::accumulate::Accumulator;
use super::classify::{DiffCategory, classify_entry};
use super::normalize::{NormalizeOutcome, normalize_entry};
use super::round::{aggregate_totals, apply_entry_rounding};

/// Extracts regular and overtime minutes from a batch of timesheet entries.
///
/// Entries are processed in ascending `(date, start_time)` order (the
/// engine sorts a copy; the input is untouched). Invalid entries are
/// skipped and reported in the result's issue list rather than failing the
/// batch. The computation fails as a whole only for an inactive or invalid
/// policy.
///
/// # Errors
///
/// - [`EngineError::InactivePolicy`] when `policy.is_active` is false.
/// - [`EngineError::InvalidPolicy`] when a policy field violates its
///   invariants.
///
/// # Example
///
/// ```
/// use overtime_engine::calculation::extract_overtime;
/// use overtime_engine::models::{ExceptionHandling, OvertimePolicy, TimesheetEntry};
/// use chrono::{NaiveDate, NaiveTime};
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
/// let entries = vec![TimesheetEntry {
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     break_minutes: 60,
///     description: None,
///     is_holiday: false,
///     is_sick: false,
///     is_vacation: false,
///     is_exception: false,
/// }];
///
/// let result = extract_overtime(&entries, &policy).unwrap();
/// assert_eq!(result.entries[0].regular_minutes, 480);
/// assert_eq!(result.entries[0].overtime_minutes, 60);
/// assert_eq!(result.totals.total_overtime_hours, Decimal::new(1, 0));
/// ```
pub fn extract_overtime(
    entries: &[TimesheetEntry],
    policy: &OvertimePolicy,
) -> EngineResult<OvertimeResult> {
    if !policy.is_active {
        return Err(EngineError::InactivePolicy {
            name: policy.name.clone(),
        });
    }
    policy.validate()?;

    let mut sorted: Vec<&TimesheetEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| (entry.date, entry.start_time));

    let mut accumulator = Accumulator::new();
    let mut rows = Vec::with_capacity(sorted.len());
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut saturation = SaturationFlags::default();
    let mut category_weighted = CategoryWeighted::default();

    for entry in sorted {
        match normalize_entry(entry, policy) {
            NormalizeOutcome::Skipped { date, reason } => {
                push_skip_warning(&mut warnings, entry, reason);
                rows.push(EntryBreakdown::skipped(date, reason, entry.is_exception));
            }
            NormalizeOutcome::Invalid(issue) => {
                issues.push(issue);
            }
            NormalizeOutcome::Worked(norm) => {
                if norm.is_exception && policy.exception_handling == ExceptionHandling::Review {
                    warnings.push(ResultWarning {
                        code: "EXCEPTION_REVIEW".to_string(),
                        message: format!("entry on {} is flagged for review", norm.date),
                    });
                }

                let mut category_minutes = CategoryMinutes::default();
                let mut classification_order: Vec<DiffCategory> = Vec::new();
                let mut regular_minutes = 0;
                let mut excluded_minutes = 0;
                let mut weighted_overtime = Decimal::ZERO;

                for interval in classify_entry(&norm, policy) {
                    let (next, outcome) = accumulator.apply(norm.date, &interval, policy);
                    accumulator = next;

                    regular_minutes += outcome.regular_minutes;
                    excluded_minutes += outcome.excluded_minutes;
                    weighted_overtime += outcome.weighted;
                    saturation.merge(&outcome.saturation);

                    if outcome.billable_minutes > 0 {
                        let slot = match outcome.category {
                            DiffCategory::Standard => &mut category_minutes.standard,
                            DiffCategory::Night => &mut category_minutes.night,
                            DiffCategory::Weekend => &mut category_minutes.weekend,
                            DiffCategory::Holiday => &mut category_minutes.holiday,
                        };
                        *slot += outcome.billable_minutes;
                        if classification_order.last() != Some(&outcome.category) {
                            classification_order.push(outcome.category);
                        }
                        let weighted_slot = match outcome.category {
                            DiffCategory::Standard => &mut category_weighted.standard,
                            DiffCategory::Night => &mut category_weighted.night,
                            DiffCategory::Weekend => &mut category_weighted.weekend,
                            DiffCategory::Holiday => &mut category_weighted.holiday,
                        };
                        *weighted_slot += outcome.weighted;
                    }
                }

                let overtime_minutes = apply_entry_rounding(
                    &mut category_minutes,
                    &classification_order,
                    policy.rounding_minutes,
                );

                rows.push(EntryBreakdown {
                    date: norm.date,
                    worked_minutes: norm.net_minutes,
                    regular_minutes,
                    overtime_minutes,
                    category_minutes,
                    excluded_minutes,
                    weighted_overtime,
                    is_weekend: norm.is_weekend,
                    is_holiday: norm.is_holiday,
                    is_exception: norm.is_exception,
                    skipped: None,
                });
            }
        }
    }

    let totals = aggregate_totals(&rows, category_weighted);

    Ok(OvertimeResult {
        entries: rows,
        totals,
        saturation,
        issues,
        warnings,
    })
}

/// Warns when a sick or vacation entry carries recorded hours.
fn push_skip_warning(
    warnings: &mut Vec<ResultWarning>,
    entry: &TimesheetEntry,
    reason: SkipReason,
) {
    if entry.gross_minutes() == 0 {
        return;
    }
    match reason {
        SkipReason::Sick => warnings.push(ResultWarning {
            code: "HOURS_ON_SICK_DAY".to_string(),
            message: format!("entry on {} is a sick day but has recorded hours", entry.date),
        }),
        SkipReason::Vacation => warnings.push(ResultWarning {
            code: "HOURS_ON_VACATION".to_string(),
            message: format!(
                "entry on {} is a vacation day but has recorded hours",
                entry.date
            ),
        }),
        SkipReason::Exception => {}
    }
}
