//! Employee administration: create, disable, reset PIN, list.
//!
//! These flows bypass the punch orchestrator entirely; they touch only the
//! credential store and the audit log.

use crate::core::security::make_pin_hash;
use crate::db::audit::append_audit;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, map_row};
use crate::utils::time::format_utc;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::json;

pub fn add_employee(conn: &Connection, name: &str, pay_rate: f64, pin: &str) -> AppResult<i64> {
    let now = format_utc(Utc::now());
    let pin_hash = make_pin_hash(pin);

    conn.execute(
        "INSERT INTO employees(name, pin_hash, pay_rate, active, created_at)
         VALUES(?1, ?2, ?3, 1, ?4)",
        params![name, pin_hash, pay_rate, now],
    )?;
    let emp_id = conn.last_insert_rowid();

    append_audit(
        conn,
        "manager",
        "employee.add",
        "employee",
        Some(emp_id),
        Some(json!({ "name": name })),
    )?;
    Ok(emp_id)
}

pub fn disable_employee(conn: &Connection, emp_id: i64) -> AppResult<()> {
    let changed = conn.execute("UPDATE employees SET active=0 WHERE id=?1", [emp_id])?;
    if changed == 0 {
        return Err(AppError::EmployeeNotFound(emp_id));
    }
    append_audit(conn, "manager", "employee.disable", "employee", Some(emp_id), None)?;
    Ok(())
}

pub fn reset_employee_pin(conn: &Connection, emp_id: i64, pin: &str) -> AppResult<()> {
    let pin_hash = make_pin_hash(pin);
    let changed = conn.execute(
        "UPDATE employees SET pin_hash=?1 WHERE id=?2",
        params![pin_hash, emp_id],
    )?;
    if changed == 0 {
        return Err(AppError::EmployeeNotFound(emp_id));
    }
    append_audit(conn, "manager", "employee.reset_pin", "employee", Some(emp_id), None)?;
    Ok(())
}

pub fn get_employee(conn: &Connection, emp_id: i64) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row("SELECT * FROM employees WHERE id=?1", [emp_id], map_row)
        .optional()?;
    Ok(emp)
}

pub fn list_employees(conn: &Connection, active_only: bool) -> AppResult<Vec<Employee>> {
    let sql = if active_only {
        "SELECT * FROM employees WHERE active=1 ORDER BY id ASC"
    } else {
        "SELECT * FROM employees ORDER BY id ASC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Active employees' `(id, pin_hash)` pairs for PIN verification.
pub fn active_credentials(conn: &Connection) -> AppResult<Vec<(i64, String)>> {
    let mut stmt = conn.prepare("SELECT id, pin_hash FROM employees WHERE active=1")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
