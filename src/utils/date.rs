use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Expand a period string into calendar dates.
/// Accepted: "YYYY-MM-DD", "YYYY-MM", "YYYY", or a range "START..END" where
/// both ends are themselves periods.
pub fn expand_period(p: &str) -> AppResult<Vec<NaiveDate>> {
    if let Some((start, end)) = p.split_once("..") {
        let s = expand_period(start)?;
        let e = expand_period(end)?;
        let (Some(&first), Some(&last)) = (s.first(), e.last()) else {
            return Err(AppError::InvalidPeriod(p.to_string()));
        };
        if last < first {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }
        return Ok(days_between(first, last));
    }

    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok(vec![d]);
    }

    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Ok(all_days_of_month(first.year(), first.month()));
    }

    if let Ok(year) = p.parse::<i32>() {
        if (1970..=9999).contains(&year) {
            return Ok(all_days_of_year(year));
        }
    }

    Err(AppError::InvalidPeriod(p.to_string()))
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(d);
        d = d.succ_opt().expect("date overflow");
    }
    out
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");
    while d.month() == month {
        out.push(d);
        d = d.succ_opt().expect("date overflow");
    }
    out
}

pub fn all_days_of_year(year: i32) -> Vec<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
    let last = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");
    days_between(first, last)
}
