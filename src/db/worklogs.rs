//! Store operations for worklog rows.
//!
//! Break segments are never stored here: a day's breaks are derived from the
//! gaps between consecutive rows by the timeline builder, so every mutation
//! in this module implicitly reshapes them.

use crate::errors::{AppError, AppResult};
use crate::models::worklog::{LogStatus, WorkLog};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, Row, params};

fn parse_ts(s: &str) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(s.to_string())),
            )
        })
}

pub fn map_row(row: &Row) -> rusqlite::Result<WorkLog> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let punch_in = parse_ts(&row.get::<_, String>("punch_in")?)?;
    let punch_out = match row.get::<_, Option<String>>("punch_out")? {
        Some(s) => Some(parse_ts(&s)?),
        None => None,
    };

    let status_str: String = row.get("status")?;
    let status = LogStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid status: {}", status_str))),
        )
    })?;

    Ok(WorkLog {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        punch_in,
        punch_out,
        total_hours: row.get("total_hours")?,
        status,
        break_minutes: row.get("break_minutes")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new row and return it with its assigned id.
pub fn create_work_log(conn: &Connection, log: &WorkLog) -> AppResult<WorkLog> {
    conn.execute(
        "INSERT INTO worklogs (user_id, date, punch_in, punch_out, total_hours, status, break_minutes, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            log.user_id,
            log.date.format("%Y-%m-%d").to_string(),
            log.punch_in.to_rfc3339(),
            log.punch_out.map(|t| t.to_rfc3339()),
            log.total_hours,
            log.status.to_db_str(),
            log.break_minutes,
            log.notes,
            log.created_at,
        ],
    )?;

    let mut created = log.clone();
    created.id = conn.last_insert_rowid();
    Ok(created)
}

/// The single active row for a user, if any.
pub fn find_active_work_log(conn: &Connection, user_id: &str) -> AppResult<Option<WorkLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM worklogs
         WHERE user_id = ?1 AND status = 'active' AND punch_out IS NULL
         ORDER BY punch_in DESC
         LIMIT 1",
    )?;
    let mut rows = stmt.query_map([user_id], map_row)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

/// Fetch a row by id, checking ownership.
pub fn get_work_log(conn: &Connection, user_id: &str, id: i64) -> AppResult<WorkLog> {
    let mut stmt = conn.prepare("SELECT * FROM worklogs WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_row)?;
    let log = match rows.next() {
        Some(r) => r?,
        None => return Err(AppError::NotFound(format!("worklog {}", id))),
    };
    if log.user_id != user_id {
        return Err(AppError::NotFound(format!("worklog {}", id)));
    }
    Ok(log)
}

/// Update all mutable fields of a row in place.
pub fn update_work_log(conn: &Connection, log: &WorkLog) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE worklogs
         SET date = ?1, punch_in = ?2, punch_out = ?3,
             total_hours = ?4, status = ?5,
             break_minutes = ?6, notes = ?7
         WHERE id = ?8",
        params![
            log.date.format("%Y-%m-%d").to_string(),
            log.punch_in.to_rfc3339(),
            log.punch_out.map(|t| t.to_rfc3339()),
            log.total_hours,
            log.status.to_db_str(),
            log.break_minutes,
            log.notes,
            log.id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("worklog {}", log.id)));
    }
    Ok(())
}

pub fn delete_work_log(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM worklogs WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("worklog {}", id)));
    }
    Ok(())
}

/// All rows whose punch-in falls on `date`, ordered by punch-in ascending,
/// the exact input shape the timeline builder expects.
pub fn load_logs_for_date(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<WorkLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM worklogs
         WHERE user_id = ?1 AND date = ?2
         ORDER BY punch_in ASC",
    )?;
    let rows = stmt.query_map(
        params![user_id, date.format("%Y-%m-%d").to_string()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rows over an inclusive date range, ordered by punch-in ascending.
pub fn list_work_logs(
    conn: &Connection,
    user_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<WorkLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM worklogs
         WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY punch_in ASC",
    )?;
    let rows = stmt.query_map(
        params![
            user_id,
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
