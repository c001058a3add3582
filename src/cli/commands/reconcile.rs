use crate::config::Config;
use crate::core::queue::DurableQueue;
use crate::core::reconciler::Reconciler;
use crate::db::pool::open_connection;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::path::Path;

/// Run one synchronous drain cycle: queued events into the punch store.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let conn = open_connection(Path::new(&cfg.database))?;
    let reconciler = Reconciler::new(conn, DurableQueue::new(&cfg.queue_file));

    let stats = reconciler.run_cycle()?;
    success(format!(
        "Reconcile: applied={} retained={}",
        stats.applied, stats.retained
    ));
    Ok(())
}
