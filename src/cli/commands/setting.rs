use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::append_audit;
use crate::db::pool::DbPool;
use crate::db::settings::{get_setting, list_settings, set_setting};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use serde_json::json;

/// Read or write string-keyed policy settings.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Setting { get, set, value, list } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(key) = get {
            match get_setting(&pool.conn, key)? {
                Some(v) => info(format!("{key} = {v}")),
                None => warning(format!("{key} is not set")),
            }
            return Ok(());
        }

        if let Some(key) = set {
            let value = value
                .as_deref()
                .ok_or_else(|| AppError::Config("--set requires --value".to_string()))?;
            set_setting(&pool.conn, key, value)?;
            append_audit(
                &pool.conn,
                "manager",
                "setting.set",
                "setting",
                None,
                Some(json!({ "key": key })),
            )?;
            success(format!("Setting saved: {key}"));
            return Ok(());
        }

        if *list {
            for (key, v) in list_settings(&pool.conn)? {
                info(format!("{key} = {v}"));
            }
            return Ok(());
        }

        return Err(AppError::Config(
            "setting: nothing to do (use --get, --set or --list)".to_string(),
        ));
    }

    Ok(())
}
