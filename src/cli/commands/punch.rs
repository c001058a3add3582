use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::queue::DurableQueue;
use crate::core::session::{PinSubmission, submit_pin};
use crate::db::pool::DbPool;
use crate::db::settings::PunchPolicy;
use crate::errors::AppResult;
use crate::models::outcome::{PunchOutcome, PunchStatus};
use crate::models::punch_action::PunchAction;
use crate::ui::messages::{Banner, print_banner};
use chrono::{Local, Utc};

/// Submit one PIN through the full pipeline and show the result banner.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch { pin, source, note } = cmd {
        let source = source.as_deref().unwrap_or(&cfg.source);

        //
        // 1. Open the store and load the policy snapshot for this call
        //
        let pool = DbPool::new(&cfg.database)?;
        let policy = PunchPolicy::load(&pool.conn)?;
        let queue = DurableQueue::new(&cfg.queue_file);

        //
        // 2. Run the pipeline: lockout -> verify -> record -> toggle
        //
        let result = submit_pin(
            &pool.conn,
            &queue,
            &policy,
            pin,
            source,
            note.as_deref(),
            Utc::now(),
        )?;

        //
        // 3. Render exactly one banner for the outcome
        //
        print_submission(&result);
    }

    Ok(())
}

pub fn print_submission(result: &PinSubmission) {
    match result {
        PinSubmission::Locked { until } => {
            print_banner(
                Banner::Locked,
                "Too many attempts",
                Some(&format!("Try again after {until}")),
            );
        }
        PinSubmission::InvalidPin => {
            print_banner(Banner::Error, "Invalid PIN", None);
        }
        PinSubmission::Punched { outcome, .. } => print_outcome(outcome),
    }
}

/// `queued` is messaged like `ok`, differing only in the "(queued)" note.
fn print_outcome(outcome: &PunchOutcome) {
    let hhmm = Local::now().format("%H:%M").to_string();
    match outcome.status {
        PunchStatus::Blocked => {
            let hint = outcome
                .retry_after_seconds
                .map(|s| format!("~{s}s"))
                .unwrap_or_default();
            print_banner(Banner::Blocked, "Try again soon", Some(&hint));
        }
        PunchStatus::Ok | PunchStatus::Queued => {
            let queued = if outcome.status == PunchStatus::Queued {
                " (queued)"
            } else {
                ""
            };
            match outcome.action {
                PunchAction::In => print_banner(
                    Banner::OkIn,
                    &format!("Clocked IN {hhmm}{queued} — Have a great shift!"),
                    None,
                ),
                PunchAction::Out => print_banner(
                    Banner::OkOut,
                    &format!("Clocked OUT {hhmm}{queued} — See you next time!"),
                    None,
                ),
            }
        }
    }
}
