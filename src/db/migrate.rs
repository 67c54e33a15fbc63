//! Schema creation and upgrades. Every check is idempotent so the engine can
//! run on each startup against any older database file.

use rusqlite::{Connection, OptionalExtension, Result};

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let found: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Ensure the internal operations `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `worklogs` table with the modern schema.
fn ensure_worklogs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS worklogs (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       TEXT NOT NULL,
            date          TEXT NOT NULL,
            punch_in      TEXT NOT NULL,
            punch_out     TEXT,
            total_hours   REAL,
            status        TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','completed')),
            break_minutes INTEGER NOT NULL DEFAULT 0,
            notes         TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_worklogs_user_date ON worklogs(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_worklogs_user_status ON worklogs(user_id, status);
        "#,
    )?;
    Ok(())
}

/// Migrate a pre-0.4 `worklogs` table that lacked the `notes` column.
fn migrate_add_notes_to_worklogs(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "worklogs")? {
        return Ok(());
    }
    if table_has_column(conn, "worklogs", "notes")? {
        return Ok(());
    }
    conn.execute_batch("ALTER TABLE worklogs ADD COLUMN notes TEXT;")?;
    Ok(())
}

/// One snapshot row per user; `logs` holds the day's punch entries as JSON.
fn ensure_timer_state_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timer_state (
            user_id             TEXT PRIMARY KEY,
            is_active           INTEGER NOT NULL DEFAULT 0,
            start_time          INTEGER,
            target_work_ms      INTEGER NOT NULL DEFAULT 0,
            target_break_ms     INTEGER NOT NULL DEFAULT 0,
            accumulated_work_ms  INTEGER NOT NULL DEFAULT 0,
            accumulated_break_ms INTEGER NOT NULL DEFAULT 0,
            last_status_change  INTEGER,
            status              TEXT NOT NULL DEFAULT 'idle' CHECK(status IN ('idle','working','on_break')),
            logs                TEXT NOT NULL DEFAULT '[]',
            updated_at          TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_holidays_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS holidays (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            date             TEXT NOT NULL,
            duration_minutes INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_holidays_date ON holidays(date);
        "#,
    )?;
    Ok(())
}

/// Run all pending schema migrations.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_worklogs_table(conn)?;
    migrate_add_notes_to_worklogs(conn)?;
    ensure_timer_state_table(conn)?;
    ensure_holidays_table(conn)?;
    Ok(())
}
