use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify;
use crate::core::timer::TimerMachine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::snapshot::TimerStatus;
use crate::ui::messages;
use crate::utils::time::{format_ms, now_ms};
use std::time::Duration;

/// Periodic snapshot sync loop. One tick: reload the snapshot (another
/// process may have punched in between), push it back, print a one-line
/// state, and fire the overtime notification the first time the target is
/// crossed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval, ticks } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let secs = interval.unwrap_or(cfg.sync_interval_secs).max(1);
        let mut remaining = *ticks;
        let mut overtime_announced = false;

        messages::info(format!("watching every {}s (Ctrl-C to stop)", secs));

        loop {
            let machine = TimerMachine::resume(&mut pool, &cfg.user)?;
            let now = now_ms();

            if machine.is_active() {
                machine.sync(&mut pool);
                let state = match machine.status() {
                    TimerStatus::Working => "working",
                    TimerStatus::OnBreak => "on break",
                    TimerStatus::Idle => "idle",
                };
                println!(
                    "[{}] work {} / break {}",
                    state,
                    format_ms(machine.total_work_ms(now)),
                    format_ms(machine.total_break_ms(now)),
                );

                if machine.is_overtime(now) && !overtime_announced {
                    notify::notify_overtime(&mut pool, cfg);
                    overtime_announced = true;
                }
            } else {
                println!("[idle]");
                overtime_announced = false;
            }

            if let Some(n) = remaining.as_mut() {
                if *n <= 1 {
                    break;
                }
                *n -= 1;
            }
            std::thread::sleep(Duration::from_secs(secs));
        }
    }
    Ok(())
}
