//! Store operations for the per-user timer snapshot.
//!
//! The upsert is unconditional: the last writer wins. Two concurrent clients
//! can silently overwrite each other; known, accepted limitation.

use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{PunchEntry, TimerSnapshot, TimerStatus};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<TimerSnapshot> {
    let status_str: String = row.get("status")?;
    let status = TimerStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid status: {}", status_str))),
        )
    })?;

    let logs_json: String = row.get("logs")?;
    let logs: Vec<PunchEntry> = serde_json::from_str(&logs_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid snapshot logs: {}", e))),
        )
    })?;

    Ok(TimerSnapshot {
        user_id: row.get("user_id")?,
        is_active: row.get::<_, i64>("is_active")? == 1,
        start_time: row.get("start_time")?,
        target_work_ms: row.get("target_work_ms")?,
        target_break_ms: row.get("target_break_ms")?,
        accumulated_work_ms: row.get("accumulated_work_ms")?,
        accumulated_break_ms: row.get("accumulated_break_ms")?,
        last_status_change: row.get("last_status_change")?,
        status,
        logs,
    })
}

pub fn get_snapshot(conn: &Connection, user_id: &str) -> AppResult<Option<TimerSnapshot>> {
    let mut stmt = conn.prepare("SELECT * FROM timer_state WHERE user_id = ?1")?;
    let snapshot = stmt.query_row([user_id], map_row).optional()?;
    Ok(snapshot)
}

/// Unconditional upsert keyed by user id (last-write-wins).
pub fn upsert_snapshot(conn: &Connection, snapshot: &TimerSnapshot) -> AppResult<()> {
    let logs_json = serde_json::to_string(&snapshot.logs)
        .map_err(|e| AppError::Other(format!("failed to serialize snapshot logs: {}", e)))?;

    conn.execute(
        "INSERT INTO timer_state (user_id, is_active, start_time, target_work_ms, target_break_ms,
                                  accumulated_work_ms, accumulated_break_ms, last_status_change,
                                  status, logs, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(user_id) DO UPDATE SET
             is_active = excluded.is_active,
             start_time = excluded.start_time,
             target_work_ms = excluded.target_work_ms,
             target_break_ms = excluded.target_break_ms,
             accumulated_work_ms = excluded.accumulated_work_ms,
             accumulated_break_ms = excluded.accumulated_break_ms,
             last_status_change = excluded.last_status_change,
             status = excluded.status,
             logs = excluded.logs,
             updated_at = excluded.updated_at",
        params![
            snapshot.user_id,
            snapshot.is_active as i64,
            snapshot.start_time,
            snapshot.target_work_ms,
            snapshot.target_break_ms,
            snapshot.accumulated_work_ms,
            snapshot.accumulated_break_ms,
            snapshot.last_status_change,
            snapshot.status.to_db_str(),
            logs_json,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn delete_snapshot(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM timer_state WHERE user_id = ?1", [user_id])?;
    Ok(())
}
