use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::{color_for_action, list_audit};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Print the audit log, one colored line per entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Audit { print } = cmd {
        if !*print {
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;
        let entries = list_audit(&pool.conn)?;

        for e in &entries {
            let target = match e.target_id {
                Some(id) => format!("{}#{}", e.target_type, id),
                None => e.target_type.clone(),
            };
            let line = format!(
                "{:>5}  {}  {:<20} {:<14} {}",
                e.id,
                e.created_at,
                e.action,
                target,
                e.meta_json.as_deref().unwrap_or("")
            );
            println!("{}", color_for_action(&e.action).paint(line));
        }

        if entries.is_empty() {
            info("Audit log is empty.");
        }
    }

    Ok(())
}
