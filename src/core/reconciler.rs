//! Background reconciler: drains the durable queue into the punch store.
//!
//! One reconciler per process. Each cycle snapshots the queue, applies each
//! event, then removes every successfully-applied id in a single compaction.
//! Events that fail to apply stay queued for the next cycle; the retry is
//! intentionally unbounded at the polling interval. A crash mid-cycle only
//! causes an idempotent reapply, never a lost event.

use crate::core::queue::DurableQueue;
use crate::db::punches::{close_open_punch, insert_open_punch};
use crate::db::settings::PunchPolicy;
use crate::errors::AppResult;
use crate::models::queued_event::{EventKind, QueuedEvent};
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::collections::HashSet;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use uuid::Uuid;

pub struct Reconciler {
    conn: Connection,
    queue: DurableQueue,
}

/// Outcome of one drain cycle.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub applied: usize,
    pub retained: usize,
}

impl Reconciler {
    /// The owner opens the connection and hands it over; the reconciler
    /// never opens a hidden one of its own.
    pub fn new(conn: Connection, queue: DurableQueue) -> Self {
        Self { conn, queue }
    }

    pub fn run_cycle(&self) -> AppResult<CycleStats> {
        let events = self.queue.snapshot()?;

        let mut applied: HashSet<Uuid> = HashSet::new();
        let mut retained = 0usize;
        for ev in &events {
            match self.apply_event(ev) {
                Ok(()) => {
                    applied.insert(ev.id);
                }
                Err(e) => {
                    warning(format!("Reconciler: apply failed for event {}: {}", ev.id, e));
                    retained += 1;
                }
            }
        }

        if !applied.is_empty() {
            self.queue.remove(&applied)?;
        }

        Ok(CycleStats {
            applied: applied.len(),
            retained,
        })
    }

    fn apply_event(&self, ev: &QueuedEvent) -> AppResult<()> {
        match ev.kind {
            EventKind::ClockIn => {
                insert_open_punch(
                    &self.conn,
                    ev.employee_id,
                    &ev.ts,
                    &ev.method,
                    ev.note.as_deref(),
                )?;
                Ok(())
            }
            EventKind::ClockOut => {
                close_open_punch(&self.conn, ev.employee_id, &ev.ts)?;
                Ok(())
            }
            // Dropped rather than retried forever; see DESIGN.md.
            EventKind::Unknown => {
                warning(format!("Reconciler: dropping unknown event kind, id={}", ev.id));
                Ok(())
            }
        }
    }
}

/// Handle to the background reconciler thread. Dropping it without calling
/// [`ReconcilerHandle::stop`] detaches the thread; the owner is expected to
/// stop and join on shutdown.
pub struct ReconcilerHandle {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl ReconcilerHandle {
    /// Signal the thread to stop and wait for it to finish. The signal is
    /// cooperative: a cycle already in progress runs to completion.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.join();
    }
}

/// Spawn the background loop. The polling interval is re-read from the
/// settings table at each cycle boundary, so tuning it does not require a
/// restart.
pub fn start(reconciler: Reconciler) -> AppResult<ReconcilerHandle> {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let handle = thread::Builder::new()
        .name("punchpad-reconciler".to_string())
        .spawn(move || {
            loop {
                if let Err(e) = reconciler.run_cycle() {
                    warning(format!("Reconciler cycle error: {e}"));
                }

                let interval = PunchPolicy::load(&reconciler.conn)
                    .map(|p| p.reconcile_interval_seconds)
                    .unwrap_or_else(|_| PunchPolicy::default().reconcile_interval_seconds);

                match stop_rx.recv_timeout(Duration::from_secs(interval)) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        })?;

    Ok(ReconcilerHandle { stop_tx, handle })
}
