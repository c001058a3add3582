use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind tag of a queued punch event.
///
/// `Unknown` absorbs kinds written by a newer version of the program; the
/// reconciler drops them with a warning instead of retrying forever.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ClockIn,
    ClockOut,
    #[serde(other)]
    Unknown,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ClockIn => "clock_in",
            EventKind::ClockOut => "clock_out",
            EventKind::Unknown => "unknown",
        }
    }
}

/// A punch that could not be written to the store directly and is parked in
/// the durable queue until the reconciler applies it.
///
/// Serialized as one compact JSON object per queue line. `ts` keeps its
/// canonical string form so a re-read event is byte-identical to what was
/// enqueued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub employee_id: i64,
    pub ts: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl QueuedEvent {
    pub fn new(
        kind: EventKind,
        employee_id: i64,
        ts: impl Into<String>,
        method: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            employee_id,
            ts: ts.into(),
            method: method.into(),
            note,
        }
    }
}
