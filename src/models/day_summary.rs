use chrono::NaiveDate;
use serde::Serialize;

/// Per-day aggregate used by `list` and `export`: timeline totals annotated
/// with the overtime/early figures and the calendar rules that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_work_ms: i64,
    pub total_break_ms: i64,
    pub overtime_ms: i64,
    pub early_ms: i64,
    pub sessions: usize,
    pub has_active_session: bool,
    pub is_off_day: bool,
    pub holiday: Option<String>,
}
