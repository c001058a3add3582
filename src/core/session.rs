//! The PIN session pipeline shared by every kiosk entry point.
//!
//! Contract enforced here once, instead of per caller: the lockout check
//! always runs before a PIN is verified; every PIN submission records
//! exactly one attempt, success or failure, before any punch is attempted.

use crate::core::orchestrator::toggle_punch;
use crate::core::queue::DurableQueue;
use crate::core::security::{check_lockout, verify_employee_pin};
use crate::db::attempts::record_attempt;
use crate::db::audit::append_audit;
use crate::db::settings::PunchPolicy;
use crate::errors::AppResult;
use crate::models::outcome::{PunchOutcome, PunchStatus};
use crate::utils::time::format_utc;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde_json::json;

#[derive(Debug)]
pub enum PinSubmission {
    /// The source is locked out; the PIN was not verified.
    Locked { until: String },
    /// No active employee matched the PIN.
    InvalidPin,
    /// The PIN verified; the punch pipeline ran.
    Punched { employee_id: i64, outcome: PunchOutcome },
}

/// Run one full PIN submission: lockout gate, verification, attempt
/// recording, then the punch orchestrator.
pub fn submit_pin(
    conn: &Connection,
    queue: &DurableQueue,
    policy: &PunchPolicy,
    pin: &str,
    source: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<PinSubmission> {
    let now_iso = format_utc(now);

    if let Some(until) = check_lockout(conn, policy, source, now)? {
        append_audit(
            conn,
            "system",
            "auth.lockout",
            "auth",
            None,
            Some(json!({ "source": source, "until": until })),
        )?;
        return Ok(PinSubmission::Locked { until });
    }

    let Some(employee_id) = verify_employee_pin(conn, pin)? else {
        record_attempt(conn, source, &now_iso, false, None, Some("bad_pin"))?;
        append_audit(
            conn,
            "system",
            "auth.pin_fail",
            "auth",
            None,
            Some(json!({ "source": source })),
        )?;
        return Ok(PinSubmission::InvalidPin);
    };
    record_attempt(conn, source, &now_iso, true, Some(employee_id), None)?;

    let outcome = toggle_punch(conn, queue, policy, employee_id, "kiosk", note, now)?;
    if outcome.status == PunchStatus::Blocked {
        append_audit(
            conn,
            "system",
            "punch.blocked",
            "punch",
            Some(employee_id),
            Some(json!({
                "action": outcome.action.as_str(),
                "source": source,
                "reason": "duplicate",
            })),
        )?;
    }

    Ok(PinSubmission::Punched { employee_id, outcome })
}
