use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::day_summaries;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_summary::DaySummary;
use crate::ui::messages;
use crate::utils::date;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_ms_hhmm;
use chrono::{Datelike, Local, NaiveDate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, now } = cmd {
        let dates = if *now {
            vec![date::today()]
        } else {
            resolve_period(period)?
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let summaries = day_summaries(&mut pool, cfg, &dates, Local::now())?;

        if summaries.is_empty() {
            messages::info("no sessions in the selected period");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("WORK", 6),
            Column::new("BREAK", 6),
            Column::new("OVERTIME", 8),
            Column::new("EARLY", 6),
            Column::new("SESS", 4),
            Column::new("NOTES", 24),
        ]);
        for s in &summaries {
            table.add_row(summary_row(s));
        }
        print!("{}", table.render());

        let total_work: i64 = summaries.iter().map(|s| s.total_work_ms).sum();
        let total_overtime: i64 = summaries.iter().map(|s| s.overtime_ms).sum();
        let total_early: i64 = summaries.iter().map(|s| s.early_ms).sum();
        println!(
            "\n{} days | work {} | overtime {} | early {}",
            summaries.len(),
            format_ms_hhmm(total_work, false),
            format_ms_hhmm(total_overtime, false),
            format_ms_hhmm(total_early, false),
        );
    }
    Ok(())
}

fn resolve_period(period: &Option<String>) -> AppResult<Vec<NaiveDate>> {
    match period {
        Some(p) => date::expand_period(p),
        None => {
            let t = date::today();
            Ok(date::all_days_of_month(t.year(), t.month()))
        }
    }
}

fn summary_row(s: &DaySummary) -> Vec<String> {
    let mut notes = Vec::new();
    if s.is_off_day {
        notes.push("off day".to_string());
    }
    if let Some(h) = &s.holiday {
        notes.push(h.clone());
    }
    if s.has_active_session {
        notes.push("active".to_string());
    }

    vec![
        s.date.to_string(),
        format_ms_hhmm(s.total_work_ms, false),
        format_ms_hhmm(s.total_break_ms, false),
        format_ms_hhmm(s.overtime_ms, false),
        format_ms_hhmm(s.early_ms, false),
        s.sessions.to_string(),
        notes.join(", "),
    ]
}
