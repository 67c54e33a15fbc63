//! Manual session entry, for backfilling days the timer never saw.

use crate::db::pool::DbPool;
use crate::db::worklogs;
use crate::errors::{AppError, AppResult};
use crate::models::worklog::{LogStatus, WorkLog, round_hours};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone};

/// Insert a completed worklog row for `date` with the given clock times.
///
/// Manual rows are always closed; an open session belongs to the live timer
/// only. Rejects inverted intervals and times that do not exist on that day
/// (DST spring-forward gaps).
pub fn add_session(
    pool: &mut DbPool,
    user_id: &str,
    date: NaiveDate,
    in_time: NaiveTime,
    out_time: NaiveTime,
) -> AppResult<WorkLog> {
    if out_time <= in_time {
        return Err(AppError::Validation(
            "punch-out must be after punch-in".into(),
        ));
    }

    let punch_in = Local
        .from_local_datetime(&date.and_time(in_time))
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(in_time.to_string()))?;
    let punch_out = Local
        .from_local_datetime(&date.and_time(out_time))
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(out_time.to_string()))?;

    let mut row = WorkLog::open(user_id, punch_in);
    row.punch_out = Some(punch_out);
    row.total_hours = Some(round_hours((punch_out - punch_in).num_milliseconds()));
    row.status = LogStatus::Completed;

    let row = worklogs::create_work_log(&pool.conn, &row)?;
    Ok(row)
}
