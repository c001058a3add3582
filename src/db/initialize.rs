use crate::db::settings::seed_default_settings;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database schema.
///
/// Idempotent: every statement is `IF NOT EXISTS`, so `init` can be re-run
/// against an existing database.
///
/// The partial unique index on open punches is the storage-layer guarantee
/// behind "at most one open punch per employee": concurrent writers racing
/// past the in-process check still cannot commit a second open row.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            pin_hash    TEXT NOT NULL,
            pay_rate    REAL NOT NULL DEFAULT 0,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS punches (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES employees(id),
            clock_in     TEXT NOT NULL,
            clock_out    TEXT,
            method       TEXT NOT NULL DEFAULT 'kiosk',
            note         TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_punches_emp_in ON punches(employee_id, clock_in);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_punches_open
            ON punches(employee_id) WHERE clock_out IS NULL;

        CREATE TABLE IF NOT EXISTS pin_attempts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            ts           TEXT NOT NULL,
            source       TEXT NOT NULL,
            success      INTEGER NOT NULL,
            employee_id  INTEGER,
            reason       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_attempts_source_ts ON pin_attempts(source, success, ts);

        CREATE TABLE IF NOT EXISTS settings (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            actor        TEXT NOT NULL,
            action       TEXT NOT NULL,
            target_type  TEXT NOT NULL,
            target_id    INTEGER,
            meta_json    TEXT,
            created_at   TEXT NOT NULL
        );
        "#,
    )?;

    seed_default_settings(conn)?;
    Ok(())
}
