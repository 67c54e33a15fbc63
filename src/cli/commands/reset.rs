use crate::config::Config;
use crate::core::timer::TimerMachine;
use crate::db::log::ops_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use chrono::Local;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    let mut machine = TimerMachine::resume(&mut pool, &cfg.user)?;
    machine.reset_day(&mut pool, Local::now())?;

    if let Err(e) = ops_log(&pool.conn, "reset", &cfg.user, "timer reset to idle") {
        messages::warning(format!("failed to write internal log: {}", e));
    }
    messages::success("timer reset; any open session was closed");
    Ok(())
}
