use chrono::NaiveDate;
use serde::Serialize;

/// Admin-defined date override. A `None` duration marks a full-day holiday
/// (all work that day counts as overtime); a value is subtracted from the
/// daily work quota (partial holiday).
#[derive(Debug, Clone, Serialize)]
pub struct Holiday {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: Option<i64>,
}

impl Holiday {
    pub fn is_full_day(&self) -> bool {
        self.duration_minutes.is_none()
    }
}
