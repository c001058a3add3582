use crate::cli::commands::punch::print_submission;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::queue::DurableQueue;
use crate::core::reconciler::{Reconciler, start};
use crate::core::session::submit_pin;
use crate::db::initialize::init_db;
use crate::db::pool::{DbPool, open_connection};
use crate::db::settings::PunchPolicy;
use crate::errors::AppResult;
use crate::ui::messages::info;
use chrono::Utc;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Kiosk loop: PIN entry with the background reconciler running.
///
/// With `--pin` the loop runs a single scripted iteration and exits (test
/// mode); otherwise PINs are read line by line from stdin until EOF.
/// Fullscreen rendering and raw key handling are left to the terminal
/// frontend; this loop owns the pipeline and the reconciler lifecycle.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Kiosk { source, pin } = cmd {
        let source = source.as_deref().unwrap_or(&cfg.source);

        //
        // 1. Make sure the store is ready before accepting PINs
        //
        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        //
        // 2. Start the reconciler with its own moved-in connection
        //
        let reconciler_conn = open_connection(Path::new(&cfg.database))?;
        let reconciler = Reconciler::new(reconciler_conn, DurableQueue::new(&cfg.queue_file));
        let handle = start(reconciler)?;

        let queue = DurableQueue::new(&cfg.queue_file);
        let result = run_loop(&pool, &queue, source, pin.as_deref());

        //
        // 3. Stop and join the reconciler before reporting any error
        //
        handle.stop();
        return result;
    }

    Ok(())
}

fn run_loop(
    pool: &DbPool,
    queue: &DurableQueue,
    source: &str,
    test_pin: Option<&str>,
) -> AppResult<()> {
    if let Some(pin) = test_pin {
        let policy = PunchPolicy::load(&pool.conn)?;
        let result = submit_pin(&pool.conn, queue, &policy, pin, source, None, Utc::now())?;
        print_submission(&result);
        return Ok(());
    }

    info("PunchPad kiosk — enter PIN (Ctrl+D to exit)");
    let stdin = io::stdin();
    loop {
        print!("PIN: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            info("Exiting kiosk.");
            return Ok(());
        }
        let pin = line.trim();
        if pin.is_empty() {
            continue;
        }

        // Fresh policy snapshot per submission, never mid-pipeline.
        let policy = PunchPolicy::load(&pool.conn)?;
        let result = submit_pin(&pool.conn, queue, &policy, pin, source, None, Utc::now())?;
        print_submission(&result);
    }
}
