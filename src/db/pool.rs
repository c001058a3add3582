//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Every connection gets the same PRAGMA set: WAL journaling with full sync
//! so a committed punch survives power loss, and a bounded busy timeout.
//! When the store stays locked past the timeout the caller falls back to
//! the durable queue instead of blocking the kiosk.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = open_connection(Path::new(path))?;
        Ok(Self { conn })
    }
}

pub fn open_connection(path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(path)?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=FULL;
         PRAGMA foreign_keys=ON;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
