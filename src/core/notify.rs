//! Fire-and-forget notification dispatch.
//!
//! Notifications are a side channel: they are written to the internal ops
//! log and echoed to the terminal, and any failure is swallowed after a
//! warning. Nothing here returns a `Result`: a messaging outage must never
//! affect time-tracking correctness, so the timer and reconciliation paths
//! cannot be blocked or failed from this module.

use crate::config::Config;
use crate::db::log::ops_log;
use crate::db::pool::DbPool;
use crate::ui::messages;

/// One-shot "overtime reached" notification, fired when the day's total
/// first exceeds the work target.
pub fn notify_overtime(pool: &mut DbPool, cfg: &Config) {
    if !cfg.notifications {
        return;
    }
    dispatch(
        pool,
        &cfg.user,
        "Workday Complete!",
        "You have completed your target hours and are now entering Overtime.",
    );
}

/// Generic announcement, for admin-style broadcasts.
pub fn announce(pool: &mut DbPool, cfg: &Config, title: &str, body: &str) {
    if !cfg.notifications {
        return;
    }
    dispatch(pool, &cfg.user, title, body);
}

fn dispatch(pool: &mut DbPool, user: &str, title: &str, body: &str) {
    messages::banner(title, body);
    if let Err(e) = ops_log(&pool.conn, "notify", user, &format!("{}: {}", title, body)) {
        messages::warning(format!("notification dispatch failed: {}", e));
    }
}
