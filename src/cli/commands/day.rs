use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::day_detail;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::segment::Segment;
use crate::ui::messages;
use crate::utils::date::{parse_date, today};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_clock, format_ms};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Day { date } = cmd {
        let d = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => today(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let detail = day_detail(&mut pool, cfg, d, Local::now())?;

        println!("=== {} ===", d);
        if detail.summary.is_off_day {
            messages::info("off day: all worked time counts as overtime");
        }
        if let Some(h) = &detail.holiday {
            match h.duration_minutes {
                Some(m) => messages::info(format!("partial holiday '{}' ({}m off quota)", h.name, m)),
                None => messages::info(format!("holiday '{}': all worked time counts as overtime", h.name)),
            }
        }

        if detail.timeline.segments.is_empty() {
            println!("No sessions recorded.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("FROM", 8),
            Column::new("TO", 8),
            Column::new("DURATION", 9),
            Column::new("KIND", 16),
            Column::new("ID", 10),
        ]);
        for seg in &detail.timeline.segments {
            table.add_row(segment_row(seg, cfg));
        }
        print!("{}", table.render());

        println!(
            "\nWork {} | Break {} | Sessions {}",
            format_ms(detail.summary.total_work_ms),
            format_ms(detail.summary.total_break_ms),
            detail.summary.sessions,
        );
        if detail.summary.overtime_ms > 0 {
            messages::success(format!("overtime {}", format_ms(detail.summary.overtime_ms)));
        }
        if detail.summary.early_ms > 0 {
            messages::warning(format!("left early by {}", format_ms(detail.summary.early_ms)));
        }
    }
    Ok(())
}

fn segment_row(seg: &Segment, cfg: &Config) -> Vec<String> {
    let from = format_clock(seg.start, &cfg.time_format);
    let to = match seg.end {
        Some(end) => format_clock(end, &cfg.time_format),
        None => "…".to_string(),
    };
    let (kind, id) = if seg.is_work() {
        (
            seg.position.label(seg.is_active).to_string(),
            seg.log_id.map(|i| i.to_string()).unwrap_or_default(),
        )
    } else {
        (
            "break".to_string(),
            format!(
                "{}+{}",
                seg.previous_log_id.unwrap_or(0),
                seg.next_log_id.unwrap_or(0)
            ),
        )
    };
    vec![from, to, format_ms(seg.duration_ms), kind, id]
}
