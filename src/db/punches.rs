//! The canonical punch store.
//!
//! `insert_open_punch` and `close_open_punch` are the enforcement point for
//! the open-punch invariant; both run their check and write inside a single
//! immediate transaction, and the partial unique index in the schema backs
//! the same rule at the storage layer.

use crate::db::audit::append_audit;
use crate::errors::{AppError, AppResult};
use crate::models::punch::{Punch, map_row};
use crate::utils::time::seconds_between;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::json;

pub fn get_open_punch(conn: &Connection, employee_id: i64) -> AppResult<Option<Punch>> {
    let punch = conn
        .query_row(
            "SELECT * FROM punches WHERE employee_id=?1 AND clock_out IS NULL",
            [employee_id],
            map_row,
        )
        .optional()?;
    Ok(punch)
}

/// Most recent punch for the employee, open or closed. Used by debounce.
pub fn last_punch(conn: &Connection, employee_id: i64) -> AppResult<Option<Punch>> {
    let punch = conn
        .query_row(
            "SELECT * FROM punches WHERE employee_id=?1 ORDER BY id DESC LIMIT 1",
            [employee_id],
            map_row,
        )
        .optional()?;
    Ok(punch)
}

/// Create an open punch. Rejects if one already exists for the employee;
/// that rejection is exactly what routes the event to the durable queue when
/// called synchronously from the orchestrator.
pub fn insert_open_punch(
    conn: &Connection,
    employee_id: i64,
    clock_in: &str,
    method: &str,
    note: Option<&str>,
) -> AppResult<i64> {
    let tx = conn.unchecked_transaction()?;

    let open: Option<i64> = tx
        .query_row(
            "SELECT id FROM punches WHERE employee_id=?1 AND clock_out IS NULL",
            [employee_id],
            |row| row.get(0),
        )
        .optional()?;
    if open.is_some() {
        return Err(AppError::OpenPunchExists(employee_id));
    }

    tx.execute(
        "INSERT INTO punches(employee_id, clock_in, clock_out, method, note)
         VALUES(?1, ?2, NULL, ?3, ?4)",
        params![employee_id, clock_in, method, note],
    )?;
    let punch_id = tx.last_insert_rowid();

    append_audit(
        &tx,
        "system",
        "punch.clock_in",
        "punch",
        Some(punch_id),
        Some(json!({ "employee_id": employee_id })),
    )?;
    tx.commit()?;
    Ok(punch_id)
}

/// Close the employee's open punch. Requires exactly one: zero means there
/// is nothing to close, more than one means a prior invariant violation and
/// surfaces as a hard error rather than being silently repaired.
pub fn close_open_punch(conn: &Connection, employee_id: i64, clock_out: &str) -> AppResult<i64> {
    let tx = conn.unchecked_transaction()?;

    let open_ids: Vec<i64> = {
        let mut stmt =
            tx.prepare("SELECT id FROM punches WHERE employee_id=?1 AND clock_out IS NULL")?;
        let rows = stmt.query_map([employee_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for r in rows {
            ids.push(r?);
        }
        ids
    };

    let punch_id = match open_ids.as_slice() {
        [] => return Err(AppError::OpenPunchMissing(employee_id)),
        [id] => *id,
        _ => {
            return Err(AppError::OpenPunchConflict {
                employee_id,
                count: open_ids.len(),
            });
        }
    };

    tx.execute(
        "UPDATE punches SET clock_out=?1 WHERE id=?2",
        params![clock_out, punch_id],
    )?;

    append_audit(
        &tx,
        "system",
        "punch.clock_out",
        "punch",
        Some(punch_id),
        Some(json!({ "employee_id": employee_id })),
    )?;
    tx.commit()?;
    Ok(punch_id)
}

/// Closed punches overlapping the half-open interval `[start, end)`,
/// ordered by clock-in ascending. Bounds are canonical UTC strings.
pub fn list_punches_between(
    conn: &Connection,
    employee_id: i64,
    start: &str,
    end: &str,
) -> AppResult<Vec<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE employee_id = ?1
           AND clock_in < ?2
           AND clock_out IS NOT NULL
           AND clock_out > ?3
         ORDER BY clock_in ASC",
    )?;
    let rows = stmt.query_map(params![employee_id, end, start], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Closed intervals clipped to `[start, end)`. Canonical-format strings
/// compare lexicographically, so min/max on the strings is the clamp.
pub fn worked_intervals(
    conn: &Connection,
    employee_id: i64,
    start: &str,
    end: &str,
) -> AppResult<Vec<(String, String)>> {
    let punches = list_punches_between(conn, employee_id, start, end)?;

    let mut intervals = Vec::new();
    for p in punches {
        let Some(out) = p.clock_out else { continue };
        let s = if p.clock_in.as_str() > start {
            p.clock_in.clone()
        } else {
            start.to_string()
        };
        let e = if out.as_str() < end { out } else { end.to_string() };
        if e > s {
            intervals.push((s, e));
        }
    }
    Ok(intervals)
}

pub fn total_seconds_worked(
    conn: &Connection,
    employee_id: i64,
    start: &str,
    end: &str,
) -> AppResult<i64> {
    let mut total = 0;
    for (s, e) in worked_intervals(conn, employee_id, start, end)? {
        total += seconds_between(&s, &e)?.max(0);
    }
    Ok(total)
}
