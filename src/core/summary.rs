//! Per-day aggregation: timeline totals plus overtime figures plus calendar
//! context, in one row per date.

use crate::config::Config;
use crate::core::overtime::{self, OvertimeFigures};
use crate::core::timeline::{DayTimeline, build_timeline};
use crate::db::pool::DbPool;
use crate::db::{holidays, worklogs};
use crate::errors::AppResult;
use crate::models::day_summary::DaySummary;
use crate::models::holiday::Holiday;
use chrono::{DateTime, Local, NaiveDate};

/// Everything the day view needs for one date.
pub struct DayDetail {
    pub summary: DaySummary,
    pub timeline: DayTimeline,
    pub holiday: Option<Holiday>,
}

/// Build the full detail for a single date.
pub fn day_detail(
    pool: &mut DbPool,
    cfg: &Config,
    date: NaiveDate,
    now: DateTime<Local>,
) -> AppResult<DayDetail> {
    let logs = worklogs::load_logs_for_date(&pool.conn, &cfg.user, date)?;
    let holiday = holidays::find_holiday(&pool.conn, date)?;
    let timeline = build_timeline(&logs, now);

    let figures: OvertimeFigures = overtime::evaluate(
        timeline.total_work_ms,
        timeline.has_active_session,
        date,
        cfg.quota_ms()?,
        holiday.as_ref(),
    );

    let summary = DaySummary {
        date,
        total_work_ms: timeline.total_work_ms,
        total_break_ms: timeline.total_break_ms,
        overtime_ms: figures.overtime_ms,
        early_ms: figures.early_ms,
        sessions: timeline.work_segments().count(),
        has_active_session: timeline.has_active_session,
        is_off_day: overtime::is_off_day(date),
        holiday: holiday.as_ref().map(|h| h.name.clone()),
    };

    Ok(DayDetail {
        summary,
        timeline,
        holiday,
    })
}

/// Summaries for a range of dates. Dates with no rows are skipped; listings
/// show worked days, not the whole calendar.
pub fn day_summaries(
    pool: &mut DbPool,
    cfg: &Config,
    dates: &[NaiveDate],
    now: DateTime<Local>,
) -> AppResult<Vec<DaySummary>> {
    let mut out = Vec::new();
    for &date in dates {
        let detail = day_detail(pool, cfg, date, now)?;
        if detail.summary.sessions > 0 {
            out.push(detail.summary);
        }
    }
    Ok(out)
}
