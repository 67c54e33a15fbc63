use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::add_session;
use crate::db::log::ops_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date, start, end } = cmd {
        let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
        let t_in = parse_time(start).ok_or_else(|| AppError::InvalidTime(start.clone()))?;
        let t_out = parse_time(end).ok_or_else(|| AppError::InvalidTime(end.clone()))?;

        let mut pool = DbPool::new(&cfg.database)?;
        let row = add_session(&mut pool, &cfg.user, d, t_in, t_out)?;

        if let Err(e) = ops_log(
            &pool.conn,
            "add",
            &cfg.user,
            &format!("manual session {} on {}", row.id, d),
        ) {
            messages::warning(format!("failed to write internal log: {}", e));
        }
        messages::success(format!(
            "session {} added: {} {}-{}",
            row.id, d, start, end
        ));
    }
    Ok(())
}
