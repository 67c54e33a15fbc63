use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// Row lifecycle: an `Active` log has no punch-out yet; punching out (or an
/// edit that supplies one) completes it. At most one active log may exist per
/// user at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Active,
    Completed,
}

impl LogStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            LogStatus::Active => "active",
            LogStatus::Completed => "completed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(LogStatus::Active),
            "completed" => Some(LogStatus::Completed),
            _ => None,
        }
    }
}

/// A single punch-in/punch-out work session.
#[derive(Debug, Clone, Serialize)]
pub struct WorkLog {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,    // ⇔ worklogs.date (TEXT "YYYY-MM-DD", local calendar day)
    pub punch_in: DateTime<Local>,
    pub punch_out: Option<DateTime<Local>>,
    pub total_hours: Option<f64>,
    pub status: LogStatus,
    pub break_minutes: i64,
    pub notes: Option<String>,
    pub created_at: String, // ISO8601
}

impl WorkLog {
    /// Open a new active session starting at `punch_in`.
    /// `id = 0` until the row is inserted.
    pub fn open(user_id: &str, punch_in: DateTime<Local>) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            date: punch_in.date_naive(),
            punch_in,
            punch_out: None,
            total_hours: None,
            status: LogStatus::Active,
            break_minutes: 0,
            notes: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LogStatus::Active
    }

    /// Elapsed milliseconds; an active session is measured up to `now`.
    pub fn duration_ms(&self, now: DateTime<Local>) -> i64 {
        let end = self.punch_out.unwrap_or(now);
        (end - self.punch_in).num_milliseconds().max(0)
    }

    /// Complete the session at `punch_out`, recomputing `total_hours`.
    pub fn close(&mut self, punch_out: DateTime<Local>) -> AppResult<()> {
        if punch_out < self.punch_in {
            return Err(AppError::Validation(
                "punch-out cannot be before punch-in".into(),
            ));
        }
        let ms = (punch_out - self.punch_in).num_milliseconds();
        self.punch_out = Some(punch_out);
        self.total_hours = Some(round_hours(ms));
        self.status = LogStatus::Completed;
        Ok(())
    }
}

/// Milliseconds → hours rounded to two decimals, the precision stored
/// in `worklogs.total_hours`.
pub fn round_hours(ms: i64) -> f64 {
    (ms as f64 / 3_600_000.0 * 100.0).round() / 100.0
}
