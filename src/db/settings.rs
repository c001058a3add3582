//! String-keyed settings table and the policy snapshot built from it.
//!
//! Components never read settings mid-operation: callers load a
//! [`PunchPolicy`] once and pass it down, refreshing it only at defined
//! boundaries (one CLI invocation, one reconciler cycle).

use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};

pub const DEBOUNCE_SECONDS: &str = "kiosk.debounce_seconds";
pub const PIN_ATTEMPT_WINDOW_SECONDS: &str = "kiosk.pin_attempt_window_seconds";
pub const PIN_MAX_ATTEMPTS_PER_WINDOW: &str = "kiosk.pin_max_attempts_per_window";
pub const LOCKOUT_MINUTES: &str = "kiosk.lockout_minutes";
pub const RECONCILE_INTERVAL_SECONDS: &str = "jobs.reconcile_interval_seconds";

pub fn get_setting(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM settings WHERE key=?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn list_settings(conn: &Connection) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert default policy values for any missing key. Existing values win.
pub fn seed_default_settings(conn: &Connection) -> AppResult<()> {
    let defaults: [(&str, &str); 5] = [
        (DEBOUNCE_SECONDS, "30"),
        (PIN_ATTEMPT_WINDOW_SECONDS, "300"),
        (PIN_MAX_ATTEMPTS_PER_WINDOW, "5"),
        (LOCKOUT_MINUTES, "10"),
        (RECONCILE_INTERVAL_SECONDS, "5"),
    ];

    for (key, value) in defaults {
        conn.execute(
            "INSERT OR IGNORE INTO settings(key, value) VALUES(?1, ?2)",
            params![key, value],
        )?;
    }
    Ok(())
}

/// Snapshot of the tunable kiosk policy, loaded from the settings table.
#[derive(Debug, Clone, PartialEq)]
pub struct PunchPolicy {
    pub debounce_seconds: i64,
    pub pin_attempt_window_seconds: i64,
    pub pin_max_attempts_per_window: usize,
    pub lockout_minutes: i64,
    pub reconcile_interval_seconds: u64,
}

impl Default for PunchPolicy {
    fn default() -> Self {
        Self {
            debounce_seconds: 30,
            pin_attempt_window_seconds: 300,
            pin_max_attempts_per_window: 5,
            lockout_minutes: 10,
            reconcile_interval_seconds: 5,
        }
    }
}

impl PunchPolicy {
    /// Load the policy from the settings table. Missing or unparsable
    /// values fall back to the defaults rather than failing the caller.
    pub fn load(conn: &Connection) -> AppResult<Self> {
        let d = Self::default();
        Ok(Self {
            debounce_seconds: load_i64(conn, DEBOUNCE_SECONDS, d.debounce_seconds)?,
            pin_attempt_window_seconds: load_i64(
                conn,
                PIN_ATTEMPT_WINDOW_SECONDS,
                d.pin_attempt_window_seconds,
            )?,
            pin_max_attempts_per_window: load_i64(
                conn,
                PIN_MAX_ATTEMPTS_PER_WINDOW,
                d.pin_max_attempts_per_window as i64,
            )? as usize,
            lockout_minutes: load_i64(conn, LOCKOUT_MINUTES, d.lockout_minutes)?,
            reconcile_interval_seconds: load_i64(
                conn,
                RECONCILE_INTERVAL_SECONDS,
                d.reconcile_interval_seconds as i64,
            )?
            .max(1) as u64,
        })
    }
}

fn load_i64(conn: &Connection, key: &str, default: i64) -> AppResult<i64> {
    Ok(get_setting(conn, key)?
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default))
}
