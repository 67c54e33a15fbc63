use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_ops_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, limit } = cmd {
        if !*print {
            messages::info("nothing to do; use --print");
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;
        let rows = load_ops_log(&pool.conn, *limit)?;

        if rows.is_empty() {
            messages::info("internal log is empty");
            return Ok(());
        }
        for (date, operation, message) in rows {
            println!("{} [{}] {}", date, operation, message);
        }
    }
    Ok(())
}
