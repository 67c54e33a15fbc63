use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerMachine;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::time::{format_ms, parse_duration_ms, parse_time};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start {
        at,
        work,
        break_minutes,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let now = Local::now();

        let entry_time = match at {
            Some(s) => parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?,
            None => now.time(),
        };
        let target_work_ms = match work {
            Some(s) => parse_duration_ms(s)?,
            None => cfg.quota_ms()?,
        };
        let target_break_ms = break_minutes.unwrap_or(cfg.break_minutes) * 60_000;

        let mut machine = TimerMachine::resume(&mut pool, &cfg.user)?;
        machine.start_day(&mut pool, target_work_ms, target_break_ms, entry_time, now)?;

        messages::success(format!(
            "workday started at {} (target {}, break budget {})",
            entry_time.format("%H:%M"),
            format_ms(target_work_ms),
            format_ms(target_break_ms),
        ));
    }
    Ok(())
}
