//! Export of day summaries to CSV or JSON.

use crate::config::Config;
use crate::core::summary::day_summaries;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::day_summary::DaySummary;
use crate::utils::time::format_ms_hhmm;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }
}

impl ExportFormat {
    /// Infer the format from a file extension, falling back to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// One flat output record per day. Durations are rendered as signed `HH:MM`
/// so spreadsheets and scripts get the same shape.
#[derive(Debug, Serialize)]
struct ExportRow {
    date: NaiveDate,
    work: String,
    r#break: String,
    overtime: String,
    early: String,
    sessions: usize,
    off_day: bool,
    holiday: String,
}

impl From<&DaySummary> for ExportRow {
    fn from(s: &DaySummary) -> Self {
        ExportRow {
            date: s.date,
            work: format_ms_hhmm(s.total_work_ms, false),
            r#break: format_ms_hhmm(s.total_break_ms, false),
            overtime: format_ms_hhmm(s.overtime_ms, false),
            early: format_ms_hhmm(s.early_ms, false),
            sessions: s.sessions,
            off_day: s.is_off_day,
            holiday: s.holiday.clone().unwrap_or_default(),
        }
    }
}

/// Export the summaries for `dates` to `path`. Returns the number of rows
/// written.
pub fn export_summaries(
    pool: &mut DbPool,
    cfg: &Config,
    dates: &[NaiveDate],
    path: &Path,
    format: ExportFormat,
) -> AppResult<usize> {
    let summaries = day_summaries(pool, cfg, dates, Local::now())?;
    if summaries.is_empty() {
        return Err(AppError::Export("no data in the selected period".into()));
    }

    match format {
        ExportFormat::Csv => write_csv(&summaries, path)?,
        ExportFormat::Json => write_json(&summaries, path)?,
    }
    Ok(summaries.len())
}

fn write_csv(summaries: &[DaySummary], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("cannot open {}: {}", path.display(), e)))?;
    for s in summaries {
        wtr.serialize(ExportRow::from(s))
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json(summaries: &[DaySummary], path: &Path) -> AppResult<()> {
    let rows: Vec<ExportRow> = summaries.iter().map(ExportRow::from).collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &rows)
        .map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}
