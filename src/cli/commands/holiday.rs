use crate::cli::parser::{Commands, HolidayAction};
use crate::config::Config;
use crate::db::holidays;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::{all_days_of_year, expand_period, parse_date, today};
use crate::utils::table::{Column, Table};
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Holiday { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            HolidayAction::Add {
                date,
                name,
                minutes,
            } => {
                let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
                if let Some(m) = minutes {
                    if *m <= 0 {
                        return Err(AppError::Validation(
                            "partial holiday minutes must be positive".into(),
                        ));
                    }
                }

                let h = holidays::add_holiday(&pool.conn, name, d, *minutes)?;
                match h.duration_minutes {
                    Some(m) => messages::success(format!(
                        "partial holiday '{}' on {} ({}m off quota)",
                        h.name, h.date, m
                    )),
                    None => messages::success(format!("holiday '{}' on {}", h.name, h.date)),
                }
            }

            HolidayAction::List { period } => {
                let dates = match period {
                    Some(p) => expand_period(p)?,
                    None => all_days_of_year(today().year()),
                };
                let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
                    return Ok(());
                };

                let list = holidays::list_holidays(&pool.conn, first, last)?;
                if list.is_empty() {
                    messages::info("no holidays in the selected period");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID", 4),
                    Column::new("DATE", 10),
                    Column::new("NAME", 24),
                    Column::new("QUOTA OFF", 9),
                ]);
                for h in &list {
                    table.add_row(vec![
                        h.id.to_string(),
                        h.date.to_string(),
                        h.name.clone(),
                        h.duration_minutes
                            .map(|m| format!("{}m", m))
                            .unwrap_or_else(|| "full day".to_string()),
                    ]);
                }
                print!("{}", table.render());
            }

            HolidayAction::Remove { id } => {
                holidays::delete_holiday(&pool.conn, *id)?;
                messages::success(format!("holiday {} removed", id));
            }
        }
    }
    Ok(())
}
