use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, pt, setup_test_db};

#[test]
fn test_punch_without_start_fails() {
    let db_path = setup_test_db("timer_punch_idle");
    init_db(&db_path);

    pt().args(["--db", &db_path, "punch"])
        .assert()
        .failure()
        .stderr(contains("no workday in progress"));
}

#[test]
fn test_start_then_status_shows_working() {
    let db_path = setup_test_db("timer_start_status");
    init_db(&db_path);

    pt().args(["--db", &db_path, "start", "--at", "09:00", "--work", "8h"])
        .assert()
        .success()
        .stdout(contains("workday started at 09:00"));

    pt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("WORKING").and(contains("punch-in")));
}

#[test]
fn test_double_start_fails() {
    let db_path = setup_test_db("timer_double_start");
    init_db(&db_path);

    pt().args(["--db", &db_path, "start", "--at", "09:00"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "start", "--at", "10:00"])
        .assert()
        .failure()
        .stderr(contains("day already started"));
}

#[test]
fn test_punch_toggles_between_work_and_break() {
    let db_path = setup_test_db("timer_toggle");
    init_db(&db_path);

    pt().args(["--db", &db_path, "start", "--at", "09:00"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "punch"])
        .assert()
        .success()
        .stdout(contains("on break"));

    pt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("ON BREAK"));

    pt().args(["--db", &db_path, "punch"])
        .assert()
        .success()
        .stdout(contains("back to work"));
}

#[test]
fn test_reset_returns_to_idle_and_closes_open_row() {
    let db_path = setup_test_db("timer_reset");
    init_db(&db_path);

    pt().args(["--db", &db_path, "start", "--at", "09:00"])
        .assert()
        .success();

    pt().args(["--db", &db_path, "reset"])
        .assert()
        .success()
        .stdout(contains("timer reset"));

    pt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("idle"));

    // The day is startable again: the open row was closed, not orphaned.
    pt().args(["--db", &db_path, "start", "--at", "13:00"])
        .assert()
        .success();
}

#[test]
fn test_watch_runs_bounded_ticks() {
    let db_path = setup_test_db("timer_watch");
    init_db(&db_path);

    pt().args(["--db", &db_path, "watch", "--interval", "1", "--ticks", "1"])
        .assert()
        .success()
        .stdout(contains("watching every 1s").and(contains("[idle]")));
}
