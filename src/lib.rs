//! PunchPad library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules (durable queue, reconciler, orchestrator, PIN security).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg),
        Commands::Punch { .. } => cli::commands::punch::handle(&cli.command, cfg),
        Commands::Kiosk { .. } => cli::commands::kiosk::handle(&cli.command, cfg),
        Commands::Queue => cli::commands::queue::handle(cfg),
        Commands::Reconcile => cli::commands::reconcile::handle(cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Setting { .. } => cli::commands::setting::handle(&cli.command, cfg),
        Commands::Audit { .. } => cli::commands::audit::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once, then apply command-line overrides.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
        // A custom database keeps its queue alongside unless --queue says
        // otherwise, so tests never share the default queue file.
        cfg.queue_file = format!("{custom_db}.queue.ndjson");
    }
    if let Some(custom_queue) = &cli.queue {
        cfg.queue_file = custom_queue.clone();
    }

    dispatch(&cli, &cfg)
}
