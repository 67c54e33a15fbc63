use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_duration_ms;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Records in the store are keyed by this id; the CLI is single-user but
    /// the storage layer is not.
    #[serde(default = "default_user")]
    pub user: String,
    /// Daily work quota, e.g. "8h" or "7h30m".
    #[serde(default = "default_work_duration")]
    pub work_duration: String,
    /// Default break budget in minutes for `start`.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
    /// Snapshot refresh interval for `watch`, in seconds.
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    /// "24h" or "12h".
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_user() -> String {
    "local".to_string()
}
fn default_work_duration() -> String {
    "8h".to_string()
}
fn default_break_minutes() -> i64 {
    60
}
fn default_sync_interval() -> u64 {
    60
}
fn default_notifications() -> bool {
    true
}
fn default_time_format() -> String {
    "24h".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            user: default_user(),
            work_duration: default_work_duration(),
            break_minutes: default_break_minutes(),
            sync_interval_secs: default_sync_interval(),
            notifications: default_notifications(),
            time_format: default_time_format(),
        }
    }
}

impl Config {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("punchtrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".punchtrack")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchtrack.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("punchtrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("failed to parse {:?}: {}", path, e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Daily work quota in milliseconds.
    pub fn quota_ms(&self) -> AppResult<i64> {
        parse_duration_ms(&self.work_duration)
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is left untouched, only the DB is created.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("failed to serialize config: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
