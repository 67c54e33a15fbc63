use crate::config::Config;
use crate::core::notify;
use crate::core::timer::TimerMachine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::snapshot::TimerStatus;
use crate::ui::messages;
use crate::utils::time::format_ms;
use chrono::Local;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let now = Local::now();

    let mut machine = TimerMachine::resume(&mut pool, &cfg.user)?;
    let outcome = machine.punch_toggle(&mut pool, now)?;

    let now_ms = now.timestamp_millis();
    match outcome.status {
        TimerStatus::OnBreak => messages::info(format!(
            "on break (worked {} so far)",
            format_ms(machine.total_work_ms(now_ms))
        )),
        TimerStatus::Working => messages::info(format!(
            "back to work (break total {})",
            format_ms(machine.total_break_ms(now_ms))
        )),
        TimerStatus::Idle => {}
    }

    if outcome.reached_overtime {
        notify::notify_overtime(&mut pool, cfg);
    }
    Ok(())
}
