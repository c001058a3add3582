use super::punch_action::PunchAction;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PunchStatus {
    /// Written to the store directly.
    Ok,
    /// The store write failed; the event is parked in the durable queue.
    Queued,
    /// Rejected by the debounce policy; nothing was written or queued.
    Blocked,
}

/// Result of a `toggle_punch` call, shared by every caller.
///
/// Callers must message `Queued` the same way as `Ok`, apart from a
/// "(queued)" annotation.
#[derive(Debug, Clone, Serialize)]
pub struct PunchOutcome {
    pub status: PunchStatus,
    pub action: PunchAction,
    pub ts: String,
    pub punch_id: Option<i64>,
    pub event_id: Option<Uuid>,
    pub retry_after_seconds: Option<i64>,
}

impl PunchOutcome {
    pub fn ok(action: PunchAction, punch_id: i64, ts: String) -> Self {
        Self {
            status: PunchStatus::Ok,
            action,
            ts,
            punch_id: Some(punch_id),
            event_id: None,
            retry_after_seconds: None,
        }
    }

    pub fn queued(action: PunchAction, event_id: Uuid, ts: String) -> Self {
        Self {
            status: PunchStatus::Queued,
            action,
            ts,
            punch_id: None,
            event_id: Some(event_id),
            retry_after_seconds: None,
        }
    }

    pub fn blocked(action: PunchAction, ts: String, retry_after_seconds: i64) -> Self {
        Self {
            status: PunchStatus::Blocked,
            action,
            ts,
            punch_id: None,
            event_id: None,
            retry_after_seconds: Some(retry_after_seconds),
        }
    }
}
