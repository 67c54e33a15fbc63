use serde::{Deserialize, Serialize};

/// Live state of the per-user workday timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    #[default]
    Idle,
    Working,
    OnBreak,
}

impl TimerStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Working => "working",
            TimerStatus::OnBreak => "on_break",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(TimerStatus::Idle),
            "working" => Some(TimerStatus::Working),
            "on_break" => Some(TimerStatus::OnBreak),
            _ => None,
        }
    }
}

/// One line of the day's activity log, shown by `status` and kept in the
/// snapshot's `logs` JSON column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchEntry {
    #[serde(rename = "type")]
    pub kind: String, // "punch-in" | "punch-out"
    pub time: i64, // epoch milliseconds
}

/// Durable snapshot of the timer, one row per user.
///
/// `accumulated_*_ms` hold completed intervals only: the open interval since
/// `last_status_change` is computed on read and folded in only when the next
/// transition occurs, so it is never double-counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub user_id: String,
    pub is_active: bool,
    pub start_time: Option<i64>, // epoch ms of day start
    pub target_work_ms: i64,
    pub target_break_ms: i64,
    pub accumulated_work_ms: i64,
    pub accumulated_break_ms: i64,
    pub last_status_change: Option<i64>, // epoch ms, set on every transition
    pub status: TimerStatus,
    pub logs: Vec<PunchEntry>,
}

impl TimerSnapshot {
    /// Fresh idle snapshot, the state before `start` or after `reset`.
    pub fn idle(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            is_active: false,
            start_time: None,
            target_work_ms: 0,
            target_break_ms: 0,
            accumulated_work_ms: 0,
            accumulated_break_ms: 0,
            last_status_change: None,
            status: TimerStatus::Idle,
            logs: Vec::new(),
        }
    }

    pub fn push_log(&mut self, kind: &str, time_ms: i64) {
        self.logs.push(PunchEntry {
            kind: kind.to_string(),
            time: time_ms,
        });
    }
}
