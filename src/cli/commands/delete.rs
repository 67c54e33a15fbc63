use crate::cli::parser::{Commands, DeleteTarget};
use crate::config::Config;
use crate::core::reconcile::{delete_break, delete_work, merge_preview};
use crate::core::timeline::build_timeline;
use crate::db::log::ops_log;
use crate::db::pool::DbPool;
use crate::db::worklogs;
use crate::errors::AppResult;
use crate::models::segment::SegmentPosition;
use crate::ui::messages;
use crate::utils::time::format_ms;
use chrono::Local;
use std::io::{self, Write};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Delete { target } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match target {
            DeleteTarget::Work { id, yes } => {
                let prompt = work_prompt(&mut pool, cfg, *id)?;
                if !*yes && !confirm(&prompt)? {
                    messages::info("aborted");
                    return Ok(());
                }

                let deleted = delete_work(&mut pool, &cfg.user, *id)?;
                log_line(
                    &pool,
                    cfg,
                    "delete-work",
                    &format!("session {} on {} deleted", deleted.id, deleted.date),
                );
                messages::success(format!("session {} deleted", deleted.id));
            }

            DeleteTarget::Break {
                previous,
                next,
                yes,
            } => {
                let prev_row = worklogs::get_work_log(&pool.conn, &cfg.user, *previous)?;
                let next_row = worklogs::get_work_log(&pool.conn, &cfg.user, *next)?;
                let preview = merge_preview(&prev_row, &next_row, Local::now())?;

                if !*yes && !confirm(&preview.describe())? {
                    messages::info("aborted");
                    return Ok(());
                }

                let merged = delete_break(&mut pool, &cfg.user, *previous, *next)?;
                log_line(
                    &pool,
                    cfg,
                    "delete-break",
                    &format!(
                        "sessions {} and {} merged into {}",
                        previous, next, merged.id
                    ),
                );
                messages::success(format!(
                    "break removed; sessions merged into {} ({})",
                    merged.id,
                    merged
                        .punch_out
                        .map(|out| format_ms((out - merged.punch_in).num_milliseconds()))
                        .unwrap_or_else(|| "still running".to_string()),
                ));
            }
        }
    }
    Ok(())
}

/// Confirmation copy depends on where the session sits in its day: deleting
/// the only session empties the day, deleting a middle one merges the
/// flanking breaks, and so on.
fn work_prompt(pool: &mut DbPool, cfg: &Config, id: i64) -> AppResult<String> {
    let row = worklogs::get_work_log(&pool.conn, &cfg.user, id)?;
    let day_rows = worklogs::load_logs_for_date(&pool.conn, &cfg.user, row.date)?;
    let timeline = build_timeline(&day_rows, Local::now());

    let seg = timeline
        .work_segments()
        .find(|s| s.log_id == Some(id));

    let msg = match seg {
        Some(s) if s.is_active => "End and delete the running session?",
        Some(s) => match s.position {
            SegmentPosition::Only => "Delete the only session of the day? The day will become empty.",
            SegmentPosition::First => {
                "Delete the first session? The day will start at the next punch-in."
            }
            SegmentPosition::Last => {
                "Delete the last session? The day will end at the previous punch-out."
            }
            SegmentPosition::Middle => {
                "Delete this middle session? The breaks around it will merge into one longer break."
            }
        },
        None => "Delete this session?",
    };
    Ok(msg.to_string())
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "YES"))
}

fn log_line(pool: &DbPool, cfg: &Config, operation: &str, message: &str) {
    if let Err(e) = ops_log(&pool.conn, operation, &cfg.user, message) {
        messages::warning(format!("failed to write internal log: {}", e));
    }
}
