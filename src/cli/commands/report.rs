use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reports::{daily_totals, daily_totals_to_csv, period_total};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::{format_hhmm, parse_date};
use std::path::Path;

/// Worked-time report over `[start, end)` calendar days (UTC).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        emp,
        start,
        end,
        daily,
        csv,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *daily || csv.is_some() {
            let start_day = parse_date(start)?;
            let end_day = parse_date(end)?;
            let totals = daily_totals(&pool.conn, *emp, start_day, end_day)?;

            if *daily {
                for (day, secs) in &totals {
                    info(format!("{}: {}", day.format("%Y-%m-%d"), format_hhmm(*secs)));
                }
            }
            if let Some(csv_path) = csv {
                daily_totals_to_csv(Path::new(csv_path), *emp, &totals)?;
                success(format!("CSV written: {csv_path}"));
            }
            return Ok(());
        }

        let secs = period_total(&pool.conn, *emp, start, end)?;
        info(format!("Total: {}", format_hhmm(secs)));
    }

    Ok(())
}
