//! Overtime / early-going calculator.
//!
//! Pure function of the day's aggregate work duration and the calendar rules
//! in force for that date. The 30-minute thresholds are fixed policy values,
//! not tunables.

use crate::models::holiday::Holiday;
use chrono::{Datelike, NaiveDate, Weekday};

/// Overruns up to this value are ignored entirely.
pub const OVERTIME_DEAD_ZONE_MS: i64 = 30 * 60_000;

/// Shortfall buffer before a concluded day is flagged as early-going.
/// Not applied when a partial holiday already lowered the quota.
pub const EARLY_COOLDOWN_MS: i64 = 30 * 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OvertimeFigures {
    pub overtime_ms: i64,
    pub early_ms: i64,
}

/// Week-of-month index: days 1-7 are week 1, 8-14 week 2, and so on.
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() + 6) / 7
}

/// Sunday is always off; Saturday is off on the 1st, 3rd and 5th week of the
/// month (alternate-Saturday pattern).
pub fn is_off_day(date: NaiveDate) -> bool {
    match date.weekday() {
        Weekday::Sun => true,
        Weekday::Sat => matches!(week_of_month(date), 1 | 3 | 5),
        _ => false,
    }
}

/// Compute the overtime and early-going figures for one day.
///
/// * Off-days and full-day holidays: every worked millisecond is overtime.
/// * Partial holidays shrink the quota by their duration and disable the
///   early-going cooldown.
/// * Early-going is never reported while a session is still running.
/// * Overtime within the dead-zone collapses to zero.
pub fn evaluate(
    total_work_ms: i64,
    has_active_session: bool,
    date: NaiveDate,
    quota_ms: i64,
    holiday: Option<&Holiday>,
) -> OvertimeFigures {
    let mut figures = OvertimeFigures::default();

    if total_work_ms > 0 {
        let full_day_holiday = holiday.map(|h| h.is_full_day()).unwrap_or(false);

        if is_off_day(date) || full_day_holiday {
            figures.overtime_ms = total_work_ms;
        } else {
            let mut effective_quota_ms = quota_ms;
            let mut apply_cooldown = true;

            if let Some(h) = holiday {
                if let Some(minutes) = h.duration_minutes {
                    effective_quota_ms = (quota_ms - minutes * 60_000).max(0);
                    apply_cooldown = false;
                }
            }

            if total_work_ms > effective_quota_ms {
                figures.overtime_ms = total_work_ms - effective_quota_ms;
            } else if !has_active_session {
                let threshold = if apply_cooldown {
                    effective_quota_ms - EARLY_COOLDOWN_MS
                } else {
                    effective_quota_ms
                };
                if total_work_ms < threshold {
                    figures.early_ms = effective_quota_ms - total_work_ms;
                }
            }
        }
    }

    if figures.overtime_ms <= OVERTIME_DEAD_ZONE_MS {
        figures.overtime_ms = 0;
    }

    figures
}
