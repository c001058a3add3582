use crate::config::Config;
use crate::core::queue::DurableQueue;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// List events pending in the durable queue.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let queue = DurableQueue::new(&cfg.queue_file);

    let mut count = 0usize;
    for ev in queue.iter()? {
        count += 1;
        info(format!(
            "{} {:<9} emp={} ts={} method={}",
            ev.id,
            ev.kind.as_str(),
            ev.employee_id,
            ev.ts,
            ev.method
        ));
    }

    if count == 0 {
        info("Queue is empty.");
    } else {
        info(format!("{count} event(s) pending."));
    }
    Ok(())
}
