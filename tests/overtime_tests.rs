use chrono::NaiveDate;
use punchtrack::core::overtime::{
    EARLY_COOLDOWN_MS, OVERTIME_DEAD_ZONE_MS, evaluate, is_off_day, week_of_month,
};
use punchtrack::models::holiday::Holiday;

const HOUR: i64 = 3_600_000;
const QUOTA: i64 = 8 * HOUR;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn full_holiday() -> Holiday {
    Holiday {
        id: 1,
        name: "Company Day".to_string(),
        date: date("2025-09-01"),
        duration_minutes: None,
    }
}

fn partial_holiday(minutes: i64) -> Holiday {
    Holiday {
        id: 2,
        name: "Half Day".to_string(),
        date: date("2025-09-01"),
        duration_minutes: Some(minutes),
    }
}

#[test]
fn test_week_of_month_boundaries() {
    assert_eq!(week_of_month(date("2025-09-01")), 1);
    assert_eq!(week_of_month(date("2025-09-07")), 1);
    assert_eq!(week_of_month(date("2025-09-08")), 2);
    assert_eq!(week_of_month(date("2025-09-28")), 4);
    assert_eq!(week_of_month(date("2025-08-30")), 5);
}

#[test]
fn test_sundays_are_always_off() {
    assert!(is_off_day(date("2025-09-07")));
    assert!(is_off_day(date("2025-09-14")));
}

#[test]
fn test_alternate_saturdays() {
    // September 2025: Saturdays fall on 6, 13, 20, 27.
    assert!(is_off_day(date("2025-09-06"))); // week 1
    assert!(!is_off_day(date("2025-09-13"))); // week 2
    assert!(is_off_day(date("2025-09-20"))); // week 3
    assert!(!is_off_day(date("2025-09-27"))); // week 4
    // A fifth-week Saturday is off.
    assert!(is_off_day(date("2025-08-30")));
}

#[test]
fn test_weekdays_are_not_off() {
    assert!(!is_off_day(date("2025-09-01")));
    assert!(!is_off_day(date("2025-09-03")));
}

#[test]
fn test_no_work_means_no_figures() {
    let f = evaluate(0, false, date("2025-09-07"), QUOTA, None);
    assert_eq!(f.overtime_ms, 0);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_overtime_within_dead_zone_collapses() {
    let f = evaluate(QUOTA + OVERTIME_DEAD_ZONE_MS, false, date("2025-09-01"), QUOTA, None);
    assert_eq!(f.overtime_ms, 0);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_overtime_beyond_dead_zone_keeps_full_overrun() {
    let f = evaluate(QUOTA + HOUR, false, date("2025-09-01"), QUOTA, None);
    assert_eq!(f.overtime_ms, HOUR);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_early_within_cooldown_is_ignored() {
    let f = evaluate(QUOTA - EARLY_COOLDOWN_MS, false, date("2025-09-01"), QUOTA, None);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_early_beyond_cooldown_reports_full_shortfall() {
    let f = evaluate(QUOTA - 2 * HOUR, false, date("2025-09-01"), QUOTA, None);
    assert_eq!(f.early_ms, 2 * HOUR);
    assert_eq!(f.overtime_ms, 0);
}

#[test]
fn test_early_never_reported_while_active() {
    let f = evaluate(QUOTA - 2 * HOUR, true, date("2025-09-01"), QUOTA, None);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_off_day_work_is_all_overtime() {
    let f = evaluate(2 * HOUR, false, date("2025-09-07"), QUOTA, None);
    assert_eq!(f.overtime_ms, 2 * HOUR);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_off_day_short_stint_still_dead_zoned() {
    let f = evaluate(20 * 60_000, false, date("2025-09-07"), QUOTA, None);
    assert_eq!(f.overtime_ms, 0);
}

#[test]
fn test_full_holiday_work_is_all_overtime() {
    let h = full_holiday();
    let f = evaluate(3 * HOUR, false, date("2025-09-01"), QUOTA, Some(&h));
    assert_eq!(f.overtime_ms, 3 * HOUR);
}

#[test]
fn test_partial_holiday_shrinks_quota() {
    // 4h holiday on an 8h quota: 5h worked is 1h of overtime.
    let h = partial_holiday(240);
    let f = evaluate(5 * HOUR, false, date("2025-09-01"), QUOTA, Some(&h));
    assert_eq!(f.overtime_ms, HOUR);
}

#[test]
fn test_partial_holiday_disables_early_cooldown() {
    // Effective quota 4h; 10 minutes short is reported even though it is
    // inside what the cooldown would normally absorb.
    let h = partial_holiday(240);
    let f = evaluate(4 * HOUR - 10 * 60_000, false, date("2025-09-01"), QUOTA, Some(&h));
    assert_eq!(f.early_ms, 10 * 60_000);
}

#[test]
fn test_partial_holiday_two_hours_short_day() {
    // 2h holiday: effective quota 6h. Five hours worked on a concluded day
    // is one hour early, reported despite being partly inside the cooldown.
    let h = partial_holiday(120);
    let f = evaluate(5 * HOUR, false, date("2025-09-01"), QUOTA, Some(&h));
    assert_eq!(f.early_ms, HOUR);
    assert_eq!(f.overtime_ms, 0);
}

#[test]
fn test_partial_holiday_longer_than_quota_floors_at_zero() {
    let h = partial_holiday(10 * 60);
    let f = evaluate(HOUR, false, date("2025-09-01"), QUOTA, Some(&h));
    // Effective quota floors at zero, so the whole hour is overtime.
    assert_eq!(f.overtime_ms, HOUR);
    assert_eq!(f.early_ms, 0);
}

#[test]
fn test_evaluate_is_pure_and_repeatable() {
    let a = evaluate(QUOTA + HOUR, false, date("2025-09-01"), QUOTA, None);
    let b = evaluate(QUOTA + HOUR, false, date("2025-09-01"), QUOTA, None);
    assert_eq!(a, b);
}
