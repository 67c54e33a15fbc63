use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::{ExportFormat, export_summaries};
use crate::db::log::ops_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date;
use chrono::Datelike;
use std::path::Path;
use std::str::FromStr;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        file,
        format,
        range,
        force,
    } = cmd
    {
        let path = Path::new(file);
        if path.exists() && !*force {
            return Err(AppError::Export(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let fmt = match format {
            Some(s) => ExportFormat::from_str(s)?,
            None => ExportFormat::from_path(path),
        };

        let dates = match range {
            Some(r) => date::expand_period(r)?,
            None => {
                let t = date::today();
                date::all_days_of_month(t.year(), t.month())
            }
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let written = export_summaries(&mut pool, cfg, &dates, path, fmt)?;

        if let Err(e) = ops_log(
            &pool.conn,
            "export",
            &cfg.user,
            &format!("{} days exported to {}", written, path.display()),
        ) {
            messages::warning(format!("failed to write internal log: {}", e));
        }
        messages::success(format!("{} days exported to {}", written, path.display()));
    }
    Ok(())
}
