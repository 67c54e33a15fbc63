use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                println!("{}", fs::read_to_string(&path)?);
            } else {
                messages::warning(format!(
                    "no config file at {}; defaults are in effect",
                    path.display()
                ));
            }
        }

        if *check {
            // A failed parse already surfaced from Config::load; what is
            // left to check are values parsing accepts but the timer cannot
            // use.
            let mut problems = Vec::new();

            match cfg.quota_ms() {
                Ok(q) if q > 0 => {}
                _ => problems.push(format!(
                    "work_duration '{}' is not usable",
                    cfg.work_duration
                )),
            }
            if cfg.break_minutes < 0 {
                problems.push(format!("break_minutes {} is negative", cfg.break_minutes));
            }
            if cfg.time_format != "24h" && cfg.time_format != "12h" {
                problems.push(format!("time_format '{}' is not 24h/12h", cfg.time_format));
            }
            if cfg.sync_interval_secs == 0 {
                problems.push("sync_interval_secs must be at least 1".to_string());
            }

            if problems.is_empty() {
                messages::success("configuration OK");
            } else {
                for p in &problems {
                    messages::warning(p);
                }
            }
        }

        if !*print_config && !*check {
            messages::info("nothing to do; use --print or --check");
        }
    }
    Ok(())
}
