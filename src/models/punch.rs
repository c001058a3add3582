use super::punch_action::PunchAction;
use crate::errors::AppError;
use rusqlite::{Result, Row};
use serde::Serialize;

/// One clock-in/clock-out pair. `clock_out` is NULL while the punch is open.
///
/// Timestamps stay in their canonical string form (`YYYY-MM-DDTHH:MM:SSZ`)
/// so rows round-trip byte-for-byte through the database and the queue.
#[derive(Debug, Clone, Serialize)]
pub struct Punch {
    pub id: i64,
    pub employee_id: i64,
    pub clock_in: String,
    pub clock_out: Option<String>,
    pub method: String,
    pub note: Option<String>,
}

impl Punch {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Direction of the most recent action recorded on this punch.
    pub fn last_action(&self) -> PunchAction {
        if self.clock_out.is_none() {
            PunchAction::In
        } else {
            PunchAction::Out
        }
    }

    /// Timestamp of the most recent action recorded on this punch.
    pub fn last_action_ts(&self) -> &str {
        match &self.clock_out {
            Some(out) => out,
            None => &self.clock_in,
        }
    }
}

pub fn map_row(row: &Row) -> Result<Punch> {
    let clock_in: String = row.get("clock_in")?;
    // Reject rows whose timestamp would poison interval arithmetic later.
    if crate::utils::time::parse_utc(&clock_in).is_err() {
        return Err(rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(clock_in.clone())),
        ));
    }

    Ok(Punch {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        clock_in,
        clock_out: row.get("clock_out")?,
        method: row.get("method")?,
        note: row.get("note")?,
    })
}
