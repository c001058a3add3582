use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create the configuration, database schema and default settings.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut config = Config::init_all(cli.db.as_deref(), cli.test)?;
    if let Some(queue) = &cli.queue {
        config.queue_file = queue.clone();
    }

    let pool = DbPool::new(&config.database)?;
    init_db(&pool.conn)?;

    success(format!("Database:  {}", config.database));
    success(format!("Queue:     {}", config.queue_file));
    if !cli.test {
        success(format!("Config:    {:?}", Config::config_file()));
    }
    Ok(())
}
