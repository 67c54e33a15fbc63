//! Timer state machine: owns the live per-user workday state, derives punch
//! events, and synchronizes snapshots to the store.
//!
//! The machine is single-threaded and cooperative: it only mutates on
//! `start_day`, `punch_toggle` and `reset_day`. Reads (`total_work_ms` and
//! friends) fold in the open interval since the last transition without
//! touching the accumulators, so a display tick can never double-count.
//!
//! Snapshot writes are optimistic: the in-memory transition happens first
//! and persistence follows as a best-effort background write with bounded
//! retry. Worklog row writes, by contrast, sit on the request path and
//! propagate their errors.

use crate::db::pool::DbPool;
use crate::db::{snapshots, worklogs};
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{TimerSnapshot, TimerStatus};
use crate::models::worklog::WorkLog;
use crate::ui::messages;
use crate::utils::time::ms_to_local;
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::time::Duration;

const SYNC_ATTEMPTS: u32 = 3;
const SYNC_BACKOFF_START: Duration = Duration::from_millis(200);

/// Result of a punch toggle, for the caller to report and act on.
#[derive(Debug, Clone, Copy)]
pub struct ToggleOutcome {
    pub status: TimerStatus,
    /// True when this transition carried the day's total past the work
    /// target for the first time (one-shot notification trigger).
    pub reached_overtime: bool,
}

pub struct TimerMachine {
    snapshot: TimerSnapshot,
}

impl TimerMachine {
    /// Reload the machine from the stored snapshot, or start idle.
    ///
    /// `last_status_change` survives in the snapshot, so a closed and
    /// reopened client resumes with the open interval intact and no
    /// in-progress time is lost.
    pub fn resume(pool: &mut DbPool, user_id: &str) -> AppResult<Self> {
        let snapshot = snapshots::get_snapshot(&pool.conn, user_id)?
            .unwrap_or_else(|| TimerSnapshot::idle(user_id));
        Ok(Self { snapshot })
    }

    pub fn snapshot(&self) -> &TimerSnapshot {
        &self.snapshot
    }

    pub fn status(&self) -> TimerStatus {
        self.snapshot.status
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_active
    }

    // ------------------------------------------------
    // Derived read-only values (computed, never stored)
    // ------------------------------------------------

    pub fn total_work_ms(&self, now_ms: i64) -> i64 {
        let mut total = self.snapshot.accumulated_work_ms;
        if self.snapshot.status == TimerStatus::Working {
            if let Some(lsc) = self.snapshot.last_status_change {
                total += (now_ms - lsc).max(0);
            }
        }
        total
    }

    pub fn total_break_ms(&self, now_ms: i64) -> i64 {
        let mut total = self.snapshot.accumulated_break_ms;
        if self.snapshot.status == TimerStatus::OnBreak {
            if let Some(lsc) = self.snapshot.last_status_change {
                total += (now_ms - lsc).max(0);
            }
        }
        total
    }

    pub fn remaining_work_ms(&self, now_ms: i64) -> i64 {
        self.snapshot.target_work_ms - self.total_work_ms(now_ms)
    }

    pub fn remaining_break_ms(&self, now_ms: i64) -> i64 {
        self.snapshot.target_break_ms - self.total_break_ms(now_ms)
    }

    pub fn is_overtime(&self, now_ms: i64) -> bool {
        self.total_work_ms(now_ms) > self.snapshot.target_work_ms
    }

    // ------------------------------------------------
    // Transitions
    // ------------------------------------------------

    /// Begin the workday: set targets, open the first worklog row, enter
    /// `Working`. Valid only from `Idle`.
    pub fn start_day(
        &mut self,
        pool: &mut DbPool,
        target_work_ms: i64,
        target_break_ms: i64,
        entry_time: NaiveTime,
        now: DateTime<Local>,
    ) -> AppResult<()> {
        if self.snapshot.is_active {
            return Err(AppError::InvalidState(
                "day already started; punch or reset first".into(),
            ));
        }
        if worklogs::find_active_work_log(&pool.conn, &self.snapshot.user_id)?.is_some() {
            return Err(AppError::InvalidState(
                "an active session already exists; reset first".into(),
            ));
        }
        if target_work_ms <= 0 {
            return Err(AppError::Validation("work target must be positive".into()));
        }

        let entry = Local
            .from_local_datetime(&now.date_naive().and_time(entry_time))
            .earliest()
            .ok_or_else(|| AppError::InvalidTime(entry_time.to_string()))?;

        // Persist the punch event first; only then commit the transition.
        let row = WorkLog::open(&self.snapshot.user_id, entry);
        worklogs::create_work_log(&pool.conn, &row)?;

        let now_ms = now.timestamp_millis();
        self.snapshot.is_active = true;
        self.snapshot.start_time = Some(entry.timestamp_millis());
        self.snapshot.target_work_ms = target_work_ms;
        self.snapshot.target_break_ms = target_break_ms;
        self.snapshot.accumulated_work_ms = 0;
        self.snapshot.accumulated_break_ms = 0;
        self.snapshot.last_status_change = Some(now_ms);
        self.snapshot.status = TimerStatus::Working;
        self.snapshot.logs.clear();
        self.snapshot.push_log("punch-in", entry.timestamp_millis());

        self.sync(pool);
        Ok(())
    }

    /// `Working → OnBreak` or `OnBreak → Working`. Folds the elapsed open
    /// interval into the accumulator of the state being left, closes or
    /// opens a worklog row accordingly.
    pub fn punch_toggle(&mut self, pool: &mut DbPool, now: DateTime<Local>) -> AppResult<ToggleOutcome> {
        let now_ms = now.timestamp_millis();
        let elapsed = self
            .snapshot
            .last_status_change
            .map(|lsc| (now_ms - lsc).max(0))
            .unwrap_or(0);

        let outcome = match self.snapshot.status {
            TimerStatus::Idle => {
                return Err(AppError::InvalidState(
                    "no workday in progress; run `start` first".into(),
                ));
            }
            TimerStatus::Working => {
                // Leaving work: close the open row before mutating state.
                let mut row = worklogs::find_active_work_log(&pool.conn, &self.snapshot.user_id)?
                    .ok_or_else(|| AppError::NotFound("no active punch-in found".into()))?;
                row.close(now)?;
                worklogs::update_work_log(&pool.conn, &row)?;

                let before = self.snapshot.accumulated_work_ms;
                self.snapshot.accumulated_work_ms = before + elapsed;
                self.snapshot.status = TimerStatus::OnBreak;
                self.snapshot.push_log("punch-out", now_ms);

                ToggleOutcome {
                    status: TimerStatus::OnBreak,
                    reached_overtime: before <= self.snapshot.target_work_ms
                        && self.snapshot.accumulated_work_ms > self.snapshot.target_work_ms,
                }
            }
            TimerStatus::OnBreak => {
                let row = WorkLog::open(&self.snapshot.user_id, now);
                worklogs::create_work_log(&pool.conn, &row)?;

                self.snapshot.accumulated_break_ms += elapsed;
                self.snapshot.status = TimerStatus::Working;
                self.snapshot.push_log("punch-in", now_ms);

                ToggleOutcome {
                    status: TimerStatus::Working,
                    reached_overtime: false,
                }
            }
        };

        self.snapshot.last_status_change = Some(now_ms);
        self.sync(pool);
        Ok(outcome)
    }

    /// Clear all accumulators and return to `Idle`. The remote snapshot is
    /// deleted; historical worklog rows are kept (a still-open row is closed
    /// so the single-active invariant holds for the next day start).
    pub fn reset_day(&mut self, pool: &mut DbPool, now: DateTime<Local>) -> AppResult<()> {
        if let Some(mut row) = worklogs::find_active_work_log(&pool.conn, &self.snapshot.user_id)? {
            row.close(now)?;
            worklogs::update_work_log(&pool.conn, &row)?;
        }

        snapshots::delete_snapshot(&pool.conn, &self.snapshot.user_id)?;
        self.snapshot = TimerSnapshot::idle(&self.snapshot.user_id);
        Ok(())
    }

    /// Best-effort snapshot upsert with bounded backoff. Never fails the
    /// caller: the in-memory transition has already happened, and the next
    /// transition or watch tick will try again.
    pub fn sync(&self, pool: &mut DbPool) {
        let mut delay = SYNC_BACKOFF_START;
        for attempt in 1..=SYNC_ATTEMPTS {
            match snapshots::upsert_snapshot(&pool.conn, &self.snapshot) {
                Ok(()) => return,
                Err(e) if attempt < SYNC_ATTEMPTS => {
                    std::thread::sleep(delay);
                    delay *= 2;
                    let _ = e;
                }
                Err(e) => {
                    messages::warning(format!("snapshot sync failed (will retry later): {}", e));
                }
            }
        }
    }

    /// Start-of-day timestamp, for display.
    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.snapshot.start_time.map(ms_to_local)
    }
}
