//! Time utilities: parsing HH:MM and duration strings, formatting milliseconds.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parse a duration string like "8h", "7h30m" or "90m" into milliseconds.
pub fn parse_duration_ms(s: &str) -> AppResult<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    let mut hours: i64 = 0;
    let mut minutes: i64 = 0;
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in trimmed.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'H' => {
                hours = digits
                    .parse()
                    .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
                digits.clear();
                seen_unit = true;
            }
            'm' | 'M' => {
                minutes = digits
                    .parse()
                    .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
                digits.clear();
                seen_unit = true;
            }
            _ => return Err(AppError::InvalidDuration(s.to_string())),
        }
    }

    // Bare number means minutes
    if !digits.is_empty() {
        if seen_unit {
            return Err(AppError::InvalidDuration(s.to_string()));
        }
        minutes = digits
            .parse()
            .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
    }

    Ok(hours * 3_600_000 + minutes * 60_000)
}

/// Human duration: "3h 30m", "45m", "0m".
pub fn format_ms(ms: i64) -> String {
    if ms <= 0 {
        return "0m".to_string();
    }
    let total_min = ms / 60_000;
    let h = total_min / 60;
    let m = total_min % 60;
    if h == 0 {
        format!("{}m", m)
    } else if m == 0 {
        format!("{}h", h)
    } else {
        format!("{}h {}m", h, m)
    }
}

/// Signed HH:MM, used for surplus-style columns.
pub fn format_ms_hhmm(ms: i64, want_sign: bool) -> String {
    let abs_min = (ms / 60_000).abs();
    let sign = if ms > 0 && want_sign {
        "+"
    } else if ms < 0 {
        "-"
    } else {
        ""
    };
    format!("{}{:02}:{:02}", sign, abs_min / 60, abs_min % 60)
}

/// Clock time respecting the configured 12h/24h format.
pub fn format_clock(t: DateTime<Local>, time_format: &str) -> String {
    if time_format == "12h" {
        t.format("%I:%M %p").to_string()
    } else {
        t.format("%H:%M").to_string()
    }
}

pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

pub fn ms_to_local(ms: i64) -> DateTime<Local> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local))
        .unwrap_or_else(Local::now)
}
