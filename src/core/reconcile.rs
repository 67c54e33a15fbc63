//! Edit reconciler: apply edit/delete operations to stored worklog rows
//! while keeping the derived timeline coherent.
//!
//! Deleting a work row needs no break bookkeeping: breaks are derived, so
//! the timeline builder reports the merged gap on the next read. Deleting a
//! break is the interesting case: the two flanking rows are merged into one
//! inside a single transaction, so the update and the delete either both
//! land or neither does.

use crate::core::timeline::build_timeline;
use crate::db::pool::DbPool;
use crate::db::worklogs;
use crate::errors::{AppError, AppResult};
use crate::models::worklog::{LogStatus, WorkLog, round_hours};
use crate::utils::time::format_ms;
use chrono::{DateTime, Local};
use rusqlite::Connection;

/// Update a session's interval in place. Neighboring rows are untouched.
///
/// A completed session must keep a punch-out; an active session may be
/// closed by supplying one.
pub fn edit_session(
    pool: &mut DbPool,
    user_id: &str,
    log_id: i64,
    new_punch_in: DateTime<Local>,
    new_punch_out: Option<DateTime<Local>>,
) -> AppResult<WorkLog> {
    let mut log = worklogs::get_work_log(&pool.conn, user_id, log_id)?;

    match new_punch_out {
        Some(out) => {
            if out < new_punch_in {
                return Err(AppError::Validation(
                    "punch-out cannot be before punch-in".into(),
                ));
            }
            log.punch_in = new_punch_in;
            log.punch_out = Some(out);
            log.total_hours = Some(round_hours((out - new_punch_in).num_milliseconds()));
            log.status = LogStatus::Completed;
        }
        None => {
            if !log.is_active() {
                return Err(AppError::Validation(
                    "a completed session needs a punch-out time".into(),
                ));
            }
            log.punch_in = new_punch_in;
            log.punch_out = None;
            log.total_hours = None;
        }
    }
    // Punch-in defines the calendar day the row belongs to.
    log.date = log.punch_in.date_naive();

    worklogs::update_work_log(&pool.conn, &log)?;
    Ok(log)
}

/// Remove a single work row. The surrounding breaks merge by derivation:
/// deleting a middle row leaves one break spanning gap + work + gap,
/// deleting first/last trims the day's boundary, deleting the only row
/// empties the day.
pub fn delete_work(pool: &mut DbPool, user_id: &str, log_id: i64) -> AppResult<WorkLog> {
    let log = worklogs::get_work_log(&pool.conn, user_id, log_id)?;
    worklogs::delete_work_log(&pool.conn, log_id)?;
    Ok(log)
}

/// Confirmation copy for a pending deletion, computed purely from the rows
/// as they are *before* any mutation.
#[derive(Debug, Clone)]
pub struct MergePreview {
    pub previous_ms: i64,
    pub next_ms: i64,
    pub break_ms: i64,
    pub next_active: bool,
    pub merged_start: DateTime<Local>,
    pub merged_end: Option<DateTime<Local>>,
}

impl MergePreview {
    pub fn describe(&self) -> String {
        let next_dur = if self.next_active {
            "ongoing".to_string()
        } else {
            format_ms(self.next_ms)
        };
        format!(
            "Remove this {} break and merge the surrounding sessions ({} + {}) into one continuous work block?",
            format_ms(self.break_ms),
            format_ms(self.previous_ms),
            next_dur,
        )
    }
}

/// Build the merge preview for the break between two rows.
pub fn merge_preview(
    previous: &WorkLog,
    next: &WorkLog,
    now: DateTime<Local>,
) -> AppResult<MergePreview> {
    let prev_out = previous.punch_out.ok_or_else(|| {
        AppError::Validation("previous session is still open; there is no break after it".into())
    })?;
    let break_ms = (next.punch_in - prev_out).num_milliseconds();
    if break_ms <= 0 {
        return Err(AppError::Validation(
            "the selected sessions are not separated by a break".into(),
        ));
    }

    let merged_end = if next.is_active() {
        None
    } else {
        // Edits can leave the earlier row ending after the later one; the
        // merged row keeps the later boundary either way.
        Some(std::cmp::max(prev_out, next.punch_out.unwrap_or(prev_out)))
    };

    Ok(MergePreview {
        previous_ms: previous.duration_ms(now),
        next_ms: next.duration_ms(now),
        break_ms,
        next_active: next.is_active(),
        merged_start: std::cmp::min(previous.punch_in, next.punch_in),
        merged_end,
    })
}

/// Remove the derived break between two work rows by merging them into one.
///
/// The surviving row (the earlier one) takes `min(punch_in)`, the later
/// punch-out (or stays open if the later row is active), a recomputed
/// `total_hours`, and the active status if either source row carried it.
/// Update and delete run in one transaction; the day's timeline is rebuilt
/// inside it and the whole operation rolls back if the result is incoherent.
pub fn delete_break(
    pool: &mut DbPool,
    user_id: &str,
    previous_log_id: i64,
    next_log_id: i64,
) -> AppResult<WorkLog> {
    if previous_log_id == next_log_id {
        return Err(AppError::Validation(
            "a break needs two distinct flanking sessions".into(),
        ));
    }

    let previous = worklogs::get_work_log(&pool.conn, user_id, previous_log_id)?;
    let next = worklogs::get_work_log(&pool.conn, user_id, next_log_id)?;

    let now = Local::now();
    let preview = merge_preview(&previous, &next, now)?;

    let mut merged = previous.clone();
    merged.punch_in = preview.merged_start;
    merged.punch_out = preview.merged_end;
    merged.date = merged.punch_in.date_naive();
    match preview.merged_end {
        Some(end) => {
            merged.total_hours = Some(round_hours((end - merged.punch_in).num_milliseconds()));
            merged.status = LogStatus::Completed;
        }
        None => {
            merged.total_hours = None;
            merged.status = LogStatus::Active;
        }
    }

    let tx = pool.conn.transaction()?;
    worklogs::update_work_log(&tx, &merged)?;
    worklogs::delete_work_log(&tx, next_log_id)?;
    validate_day(&tx, user_id, &merged, now)?;
    tx.commit()?;

    Ok(merged)
}

/// Re-derive the day's timeline from the mutated rows and reject the
/// transaction if the result violates the merge invariants.
fn validate_day(
    conn: &Connection,
    user_id: &str,
    merged: &WorkLog,
    now: DateTime<Local>,
) -> AppResult<()> {
    if let Some(out) = merged.punch_out {
        if out < merged.punch_in {
            return Err(AppError::Validation(
                "merged session would end before it starts".into(),
            ));
        }
    }

    let rows = worklogs::load_logs_for_date(conn, user_id, merged.date)?;
    let active_count = rows.iter().filter(|r| r.is_active()).count();
    if active_count > 1 {
        return Err(AppError::Validation(
            "merge would leave more than one active session".into(),
        ));
    }

    let timeline = build_timeline(&rows, now);
    if timeline.segments.iter().any(|s| s.duration_ms < 0) {
        return Err(AppError::Validation(
            "merge would produce a negative-length segment".into(),
        ));
    }

    Ok(())
}
