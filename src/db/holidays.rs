use crate::errors::{AppError, AppResult};
use crate::models::holiday::Holiday;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Holiday> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Holiday {
        id: row.get("id")?,
        name: row.get("name")?,
        date,
        duration_minutes: row.get("duration_minutes")?,
    })
}

pub fn add_holiday(
    conn: &Connection,
    name: &str,
    date: NaiveDate,
    duration_minutes: Option<i64>,
) -> AppResult<Holiday> {
    conn.execute(
        "INSERT INTO holidays (name, date, duration_minutes) VALUES (?1, ?2, ?3)",
        params![name, date.format("%Y-%m-%d").to_string(), duration_minutes],
    )?;

    Ok(Holiday {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        date,
        duration_minutes,
    })
}

/// Holidays over an inclusive range, ordered by date.
pub fn list_holidays(conn: &Connection, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Holiday>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM holidays WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![
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

pub fn find_holiday(conn: &Connection, date: NaiveDate) -> AppResult<Option<Holiday>> {
    let mut stmt = conn.prepare("SELECT * FROM holidays WHERE date = ?1 LIMIT 1")?;
    let mut rows = stmt.query_map([date.format("%Y-%m-%d").to_string()], map_row)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn delete_holiday(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM holidays WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("holiday {}", id)));
    }
    Ok(())
}
