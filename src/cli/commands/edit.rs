use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::edit_session;
use crate::db::pool::DbPool;
use crate::db::worklogs;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::time::parse_time;
use chrono::{DateTime, Local, NaiveTime, TimeZone};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, start, end } = cmd {
        let t_in = parse_time(start).ok_or_else(|| AppError::InvalidTime(start.clone()))?;
        let t_out = match end {
            Some(s) => Some(parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;

        // Clock times are interpreted on the row's own calendar day.
        let row = worklogs::get_work_log(&pool.conn, &cfg.user, *id)?;
        let new_in = on_day(row.date, t_in)?;
        let new_out = match t_out {
            Some(t) => Some(on_day(row.date, t)?),
            None => None,
        };

        let updated = edit_session(&mut pool, &cfg.user, *id, new_in, new_out)?;
        messages::success(format!(
            "session {} updated: {} {}-{}",
            updated.id,
            updated.date,
            start,
            end.as_deref().unwrap_or("(open)"),
        ));
    }
    Ok(())
}

fn on_day(date: chrono::NaiveDate, time: NaiveTime) -> AppResult<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(time.to_string()))
}
