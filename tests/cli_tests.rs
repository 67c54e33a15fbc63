use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, pt, setup_test_db, temp_out};

fn add_session(db_path: &str, date: &str, start: &str, end: &str) {
    pt().args(["--db", db_path, "add", date, "--in", start, "--out", end])
        .assert()
        .success();
}

#[test]
fn test_add_and_day_view() {
    let db_path = setup_test_db("cli_add_day");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "12:00");
    add_session(&db_path, "2025-09-01", "13:00", "17:00");

    pt().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(
            contains("first session")
                .and(contains("break"))
                .and(contains("last session"))
                .and(contains("Work 7h")),
        );
}

#[test]
fn test_add_rejects_inverted_times() {
    let db_path = setup_test_db("cli_add_inverted");
    init_db(&db_path);

    pt().args([
        "--db",
        &db_path,
        "add",
        "2025-09-01",
        "--in",
        "17:00",
        "--out",
        "09:00",
    ])
    .assert()
    .failure()
    .stderr(contains("punch-out must be after punch-in"));
}

#[test]
fn test_list_month_summary() {
    let db_path = setup_test_db("cli_list_month");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "17:00");
    add_session(&db_path, "2025-09-02", "09:00", "12:00");

    pt().args(["--db", &db_path, "list", "--period", "2025-09"])
        .assert()
        .success()
        .stdout(
            contains("2025-09-01")
                .and(contains("2025-09-02"))
                .and(contains("2 days")),
        );
}

#[test]
fn test_list_empty_period() {
    let db_path = setup_test_db("cli_list_empty");
    init_db(&db_path);

    pt().args(["--db", &db_path, "list", "--period", "2024-01"])
        .assert()
        .success()
        .stdout(contains("no sessions in the selected period"));
}

#[test]
fn test_list_rejects_bad_period() {
    let db_path = setup_test_db("cli_list_bad_period");
    init_db(&db_path);

    pt().args(["--db", &db_path, "list", "--period", "not-a-period"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_edit_session_via_cli() {
    let db_path = setup_test_db("cli_edit");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "12:00");

    // ids start at 1 in a fresh database
    pt().args([
        "--db", &db_path, "edit", "1", "--in", "08:00", "--out", "12:30",
    ])
    .assert()
    .success()
    .stdout(contains("session 1 updated"));

    pt().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Work 4h 30m"));
}

#[test]
fn test_delete_work_with_yes_flag() {
    let db_path = setup_test_db("cli_delete_work");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "12:00");

    pt().args(["--db", &db_path, "delete", "work", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("session 1 deleted"));

    pt().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("No sessions recorded"));
}

#[test]
fn test_delete_break_merges_via_cli() {
    let db_path = setup_test_db("cli_delete_break");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "12:00");
    add_session(&db_path, "2025-09-01", "13:00", "17:00");

    pt().args(["--db", &db_path, "delete", "break", "1", "2", "--yes"])
        .assert()
        .success()
        .stdout(contains("sessions merged into 1"));

    pt().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("only session").and(contains("Work 8h")));
}

#[test]
fn test_holiday_roundtrip() {
    let db_path = setup_test_db("cli_holiday");
    init_db(&db_path);

    pt().args([
        "--db",
        &db_path,
        "holiday",
        "add",
        "2025-09-01",
        "Company Day",
    ])
    .assert()
    .success()
    .stdout(contains("holiday 'Company Day' on 2025-09-01"));

    pt().args(["--db", &db_path, "holiday", "list", "--period", "2025"])
        .assert()
        .success()
        .stdout(contains("Company Day").and(contains("full day")));

    pt().args(["--db", &db_path, "holiday", "remove", "1"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "holiday", "list", "--period", "2025"])
        .assert()
        .success()
        .stdout(contains("no holidays in the selected period"));
}

#[test]
fn test_full_holiday_turns_work_into_overtime() {
    let db_path = setup_test_db("cli_holiday_overtime");
    init_db(&db_path);

    add_session(&db_path, "2025-09-02", "09:00", "12:00");
    pt().args([
        "--db",
        &db_path,
        "holiday",
        "add",
        "2025-09-02",
        "Company Day",
    ])
    .assert()
    .success();

    pt().args(["--db", &db_path, "day", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("overtime 3h"));
}

#[test]
fn test_partial_holiday_with_minutes() {
    let db_path = setup_test_db("cli_holiday_partial");
    init_db(&db_path);

    pt().args([
        "--db",
        &db_path,
        "holiday",
        "add",
        "2025-09-03",
        "Half Day",
        "--minutes",
        "240",
    ])
    .assert()
    .success()
    .stdout(contains("partial holiday").and(contains("240m")));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "17:00");

    let csv_path = temp_out("cli_export_csv", "csv");
    pt().args([
        "--db",
        &db_path,
        "export",
        "--file",
        &csv_path,
        "--range",
        "2025-09",
    ])
    .assert()
    .success()
    .stdout(contains("1 days exported"));

    let csv = fs::read_to_string(&csv_path).expect("read csv");
    assert!(csv.contains("2025-09-01"));
    assert!(csv.contains("08:00"));

    let json_path = temp_out("cli_export_json", "json");
    pt().args([
        "--db",
        &db_path,
        "export",
        "--file",
        &json_path,
        "--format",
        "json",
        "--range",
        "2025-09",
    ])
    .assert()
    .success();

    let json = fs::read_to_string(&json_path).expect("read json");
    assert!(json.contains("\"date\": \"2025-09-01\""));
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let db_path = setup_test_db("cli_export_force");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "17:00");

    let out = temp_out("cli_export_exists", "csv");
    fs::write(&out, "existing").expect("precreate file");

    pt().args([
        "--db", &db_path, "export", "--file", &out, "--range", "2025-09",
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));

    pt().args([
        "--db", &db_path, "export", "--file", &out, "--range", "2025-09", "--force",
    ])
    .assert()
    .success();
}

#[test]
fn test_export_empty_period_fails() {
    let db_path = setup_test_db("cli_export_empty");
    init_db(&db_path);

    let out = temp_out("cli_export_empty", "csv");
    pt().args([
        "--db", &db_path, "export", "--file", &out, "--range", "2024-01",
    ])
    .assert()
    .failure()
    .stderr(contains("no data in the selected period"));
}

#[test]
fn test_ops_log_records_operations() {
    let db_path = setup_test_db("cli_ops_log");
    init_db(&db_path);

    add_session(&db_path, "2025-09-01", "09:00", "12:00");

    pt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("[init]").and(contains("[add]")));
}
