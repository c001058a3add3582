//! Append-only audit trail.
//!
//! Administrative operations, punch writes, and authentication failures all
//! leave a row here. Audit metadata never contains PINs, hashed or not.

use crate::errors::AppResult;
use crate::utils::time::format_utc;
use ansi_term::Colour;
use chrono::Utc;
use rusqlite::{Connection, Row, params};

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub actor: String,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<i64>,
    pub meta_json: Option<String>,
    pub created_at: String,
}

pub fn append_audit(
    conn: &Connection,
    actor: &str,
    action: &str,
    target_type: &str,
    target_id: Option<i64>,
    meta: Option<serde_json::Value>,
) -> AppResult<()> {
    let now = format_utc(Utc::now());
    let meta_json = meta.map(|m| m.to_string());

    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log(actor, action, target_type, target_id, meta_json, created_at)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![actor, action, target_type, target_id, meta_json, now])?;
    Ok(())
}

pub fn list_audit(conn: &Connection) -> AppResult<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, actor, action, target_type, target_id, meta_json, created_at
         FROM audit_log ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_row(row: &Row) -> rusqlite::Result<AuditEntry> {
    Ok(AuditEntry {
        id: row.get(0)?,
        actor: row.get(1)?,
        action: row.get(2)?,
        target_type: row.get(3)?,
        target_id: row.get(4)?,
        meta_json: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// ANSI color for an audit action, used by `punchpad audit --print`.
pub fn color_for_action(action: &str) -> Colour {
    match action {
        "punch.clock_in" => Colour::Green,
        "punch.clock_out" => Colour::Blue,
        "punch.blocked" => Colour::Yellow,
        "auth.pin_fail" => Colour::Red,
        "auth.lockout" => Colour::Red,
        other if other.starts_with("employee.") => Colour::Purple,
        _ => Colour::White,
    }
}
