//! The durable punch queue: an append-only NDJSON log that survives a crash
//! between enqueue and reconciliation.
//!
//! One JSON object per line. Appends are a single write of a full line plus
//! a data sync, so concurrent enqueuers cannot interleave partial lines and
//! a successful return means the event is recoverable. Compaction rewrites
//! the log through a temp file in the same directory, syncs it, renames it
//! over the original, then syncs the directory, so a half-written queue file
//! is never observable. Only the reconciler calls [`DurableQueue::remove`];
//! concurrent removers are not supported.

use crate::errors::AppResult;
use crate::models::queued_event::QueuedEvent;
use crate::ui::messages::warning;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct DurableQueue {
    path: PathBuf,
}

impl DurableQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event and flush it to the physical medium before
    /// returning. A failure here is fatal for the punch attempt; there is
    /// no further fallback tier.
    pub fn enqueue(&self, event: &QueuedEvent) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }

    /// Lazy iterator over all currently queued events in append order.
    /// Malformed or truncated lines (a writer crash mid-line) are logged
    /// and skipped; they never halt recovery of the records after them.
    pub fn iter(&self) -> AppResult<QueueIter> {
        let lines = match File::open(&self.path) {
            Ok(file) => Some(BufReader::new(file).lines()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(QueueIter { lines, line_no: 0 })
    }

    /// All currently queued events, iterated to completion before any
    /// mutation. The reconciler snapshots before applying.
    pub fn snapshot(&self) -> AppResult<Vec<QueuedEvent>> {
        Ok(self.iter()?.collect())
    }

    /// Atomically remove the named events, keeping everything else
    /// (including corrupt lines) in original relative order. Idempotent:
    /// ids not present are ignored, so a crash between apply and remove
    /// only means a reapply on the next pass.
    pub fn remove(&self, ids: &HashSet<Uuid>) -> AppResult<()> {
        if ids.is_empty() || !self.path.exists() {
            return Ok(());
        }

        let tmp_path = self.path.with_extension("ndjson.tmp");
        let result = self.compact_into(&tmp_path, ids);
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn compact_into(&self, tmp_path: &Path, ids: &HashSet<Uuid>) -> AppResult<()> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut out = File::create(tmp_path)?;

        let mut kept = 0usize;
        let mut removed = 0usize;
        for line in reader.lines() {
            let line = line?;
            let ev_id = serde_json::from_str::<QueuedEvent>(&line).map(|ev| ev.id).ok();
            if ev_id.is_some_and(|id| ids.contains(&id)) {
                removed += 1;
                continue;
            }
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
            kept += 1;
        }
        out.sync_data()?;
        drop(out);

        fs::rename(tmp_path, &self.path)?;
        sync_parent_dir(&self.path);

        warning(format!("Queue compacted: removed={removed} kept={kept}"));
        Ok(())
    }
}

/// Flush the directory entry after a rename. Best-effort: not every
/// platform allows opening a directory for sync.
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

pub struct QueueIter {
    lines: Option<Lines<BufReader<File>>>,
    line_no: usize,
}

impl Iterator for QueueIter {
    type Item = QueuedEvent;

    fn next(&mut self) -> Option<QueuedEvent> {
        let lines = self.lines.as_mut()?;
        loop {
            self.line_no += 1;
            match lines.next()? {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<QueuedEvent>(trimmed) {
                        Ok(ev) => return Some(ev),
                        Err(_) => {
                            warning(format!("Queue: skipping corrupt line {}", self.line_no));
                            continue;
                        }
                    }
                }
                Err(_) => {
                    warning(format!("Queue: read error at line {}", self.line_no));
                    return None;
                }
            }
        }
    }
}
