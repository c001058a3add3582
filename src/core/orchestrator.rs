//! The punch orchestrator: the single `toggle_punch` entry point used by
//! every caller.
//!
//! Decision order matters: the debounce check runs before the store attempt
//! so a blocked duplicate never generates a queue event. Only genuine
//! attempts that fail at the storage layer are queued.

use crate::core::queue::DurableQueue;
use crate::db::punches::{get_open_punch, insert_open_punch, close_open_punch, last_punch};
use crate::db::settings::PunchPolicy;
use crate::errors::AppResult;
use crate::models::outcome::PunchOutcome;
use crate::models::punch_action::PunchAction;
use crate::models::queued_event::{EventKind, QueuedEvent};
use crate::ui::messages::warning;
use crate::utils::time::{format_utc, parse_utc};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Toggle the employee's punch state at instant `now`.
///
/// 1. Desired action: `out` if an open punch exists, else `in`.
/// 2. Debounce: if the last recorded action has the same direction and
///    happened within `[0, debounce_window)` seconds, reject as `blocked`.
/// 3. Direct store write; on success return `ok`.
/// 4. On any storage failure, park the event in the durable queue and
///    return `queued`. An enqueue failure propagates; there is no further
///    fallback.
pub fn toggle_punch(
    conn: &Connection,
    queue: &DurableQueue,
    policy: &PunchPolicy,
    employee_id: i64,
    method: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<PunchOutcome> {
    let action = if get_open_punch(conn, employee_id)?.is_some() {
        PunchAction::Out
    } else {
        PunchAction::In
    };
    let ts = format_utc(now);

    if should_block_duplicate(conn, employee_id, action, policy.debounce_seconds, now)? {
        return Ok(PunchOutcome::blocked(action, ts, policy.debounce_seconds));
    }

    let attempt = match action {
        PunchAction::In => insert_open_punch(conn, employee_id, &ts, method, note),
        PunchAction::Out => close_open_punch(conn, employee_id, &ts),
    };

    match attempt {
        Ok(punch_id) => Ok(PunchOutcome::ok(action, punch_id, ts)),
        Err(e) => {
            let kind = match action {
                PunchAction::In => EventKind::ClockIn,
                PunchAction::Out => EventKind::ClockOut,
            };
            let event =
                QueuedEvent::new(kind, employee_id, ts.clone(), method, note.map(String::from));
            queue.enqueue(&event)?;
            warning(format!(
                "Punch queued for employee {employee_id} ({}): {e}",
                action.as_str()
            ));
            Ok(PunchOutcome::queued(action, event.id, ts))
        }
    }
}

/// True when the most recent punch record carries the same action direction
/// within the half-open window `[0, debounce_seconds)`. A delta of exactly
/// the window is a legitimate re-entry, not a double-tap.
fn should_block_duplicate(
    conn: &Connection,
    employee_id: i64,
    action: PunchAction,
    debounce_seconds: i64,
    now: DateTime<Utc>,
) -> AppResult<bool> {
    let Some(last) = last_punch(conn, employee_id)? else {
        return Ok(false);
    };

    if last.last_action() != action {
        return Ok(false);
    }

    let last_ts = match parse_utc(last.last_action_ts()) {
        Ok(ts) => ts,
        // An unreadable historical timestamp must not lock the kiosk.
        Err(_) => return Ok(false),
    };

    let delta = (now - last_ts).num_seconds();
    Ok(delta >= 0 && delta < debounce_seconds)
}
