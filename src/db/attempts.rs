//! Append-only ledger of PIN attempts, partitioned by source for lockout.

use crate::errors::AppResult;
use crate::models::attempt::{PinAttempt, map_row};
use rusqlite::{Connection, params};

pub fn record_attempt(
    conn: &Connection,
    source: &str,
    ts: &str,
    success: bool,
    employee_id: Option<i64>,
    reason: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO pin_attempts(ts, source, success, employee_id, reason)
         VALUES(?1, ?2, ?3, ?4, ?5)",
        params![ts, source, if success { 1 } else { 0 }, employee_id, reason],
    )?;
    Ok(())
}

/// Timestamps of failed attempts for `source` at or after `window_start`,
/// most recent first.
pub fn failed_attempts_since(
    conn: &Connection,
    source: &str,
    window_start: &str,
) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT ts FROM pin_attempts
         WHERE source=?1 AND success=0 AND ts>=?2
         ORDER BY ts DESC",
    )?;
    let rows = stmt.query_map(params![source, window_start], |row| row.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_attempts(conn: &Connection, source: &str) -> AppResult<Vec<PinAttempt>> {
    let mut stmt =
        conn.prepare("SELECT * FROM pin_attempts WHERE source=?1 ORDER BY id ASC")?;
    let rows = stmt.query_map([source], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
