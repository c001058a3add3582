use rusqlite::{Result, Row};
use serde::Serialize;

/// One PIN attempt, successful or not. Rows are append-only and are only
/// read back to compute per-source lockout windows.
#[derive(Debug, Clone, Serialize)]
pub struct PinAttempt {
    pub id: i64,
    pub ts: String,
    pub source: String,
    pub success: bool,
    pub employee_id: Option<i64>,
    pub reason: Option<String>,
}

pub fn map_row(row: &Row) -> Result<PinAttempt> {
    Ok(PinAttempt {
        id: row.get("id")?,
        ts: row.get("ts")?,
        source: row.get("source")?,
        success: row.get::<_, i64>("success")? == 1,
        employee_id: row.get("employee_id")?,
        reason: row.get("reason")?,
    })
}
