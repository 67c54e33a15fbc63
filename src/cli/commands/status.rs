use crate::config::Config;
use crate::core::timer::TimerMachine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::snapshot::TimerStatus;
use crate::ui::messages;
use crate::utils::time::{format_clock, format_ms, format_ms_hhmm, ms_to_local, now_ms};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let machine = TimerMachine::resume(&mut pool, &cfg.user)?;

    if !machine.is_active() {
        messages::info("timer is idle; run `start` to begin the workday");
        return Ok(());
    }

    let now = now_ms();
    let snap = machine.snapshot();

    let state = match machine.status() {
        TimerStatus::Working => "WORKING",
        TimerStatus::OnBreak => "ON BREAK",
        TimerStatus::Idle => "IDLE",
    };
    println!("Status     : {}", state);
    if let Some(start) = machine.start_time() {
        println!("Started at : {}", format_clock(start, &cfg.time_format));
    }
    println!(
        "Work       : {} of {} (remaining {})",
        format_ms(machine.total_work_ms(now)),
        format_ms(snap.target_work_ms),
        format_ms_hhmm(machine.remaining_work_ms(now), false),
    );
    println!(
        "Break      : {} of {} (remaining {})",
        format_ms(machine.total_break_ms(now)),
        format_ms(snap.target_break_ms),
        format_ms_hhmm(machine.remaining_break_ms(now), false),
    );
    if machine.is_overtime(now) {
        messages::warning("work target reached; you are in overtime");
    }

    if !snap.logs.is_empty() {
        println!("\nPunches:");
        for entry in &snap.logs {
            println!(
                "  {} {}",
                format_clock(ms_to_local(entry.time), &cfg.time_format),
                entry.kind,
            );
        }
    }
    Ok(())
}
