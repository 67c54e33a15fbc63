#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use punchtrack::db::pool::DbPool;
use punchtrack::db::worklogs;
use punchtrack::models::worklog::WorkLog;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const TEST_USER: &str = "local";

pub fn pt() -> Command {
    cargo_bin_cmd!("punchtrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchtrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema via the CLI (same entry point users hit)
pub fn init_db(db_path: &str) {
    pt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Open a pool on an initialized schema, for library-level tests
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    punchtrack::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}

pub fn at(date: &str, time: &str) -> DateTime<Local> {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test date");
    let t = NaiveTime::parse_from_str(time, "%H:%M").expect("test time");
    Local
        .from_local_datetime(&d.and_time(t))
        .earliest()
        .expect("unambiguous local time")
}

/// Insert a completed session directly through the library API
pub fn seed_session(pool: &DbPool, date: &str, start: &str, end: &str) -> WorkLog {
    let mut row = WorkLog::open(TEST_USER, at(date, start));
    row.close(at(date, end)).expect("close seeded row");
    worklogs::create_work_log(&pool.conn, &row).expect("insert seeded row")
}

/// Insert a still-open session directly through the library API
pub fn seed_open_session(pool: &DbPool, date: &str, start: &str) -> WorkLog {
    let row = WorkLog::open(TEST_USER, at(date, start));
    worklogs::create_work_log(&pool.conn, &row).expect("insert seeded row")
}
