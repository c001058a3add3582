use rusqlite::{Result, Row};
use serde::Serialize;

/// An employee row. The PIN is stored only as a salted PBKDF2 hash; the
/// plaintext never touches the database, the audit log, or the console.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub pay_rate: f64,
    pub active: bool,
    pub created_at: String,
}

pub fn map_row(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        pin_hash: row.get("pin_hash")?,
        pay_rate: row.get("pay_rate")?,
        active: row.get::<_, i64>("active")? == 1,
        created_at: row.get("created_at")?,
    })
}
