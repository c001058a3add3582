#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use punchpad::db::initialize::init_db;
use punchpad::db::pool::open_connection;
use rusqlite::{Connection, params};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn pp() -> Command {
    cargo_bin_cmd!("punchpad")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file, together with the queue file that would sit next to it.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchpad.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(queue_path_for(&db_path)).ok();
    db_path
}

/// Queue file path the CLI derives for a custom database.
pub fn queue_path_for(db_path: &str) -> String {
    format!("{db_path}.queue.ndjson")
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Open a connection with the standard PRAGMAs and create the schema.
pub fn open_test_conn(db_path: &str) -> Connection {
    let conn = open_connection(Path::new(db_path)).expect("open test db");
    init_db(&conn).expect("init test db");
    conn
}

/// Insert an employee row directly with a pre-made credential. Library-level
/// tests that never verify a PIN use a placeholder hash to stay fast.
pub fn add_employee_with_hash(conn: &Connection, name: &str, pin_hash: &str) -> i64 {
    conn.execute(
        "INSERT INTO employees(name, pin_hash, pay_rate, active, created_at)
         VALUES(?1, ?2, 0.0, 1, '2025-06-01T00:00:00Z')",
        params![name, pin_hash],
    )
    .expect("insert employee");
    conn.last_insert_rowid()
}

pub fn add_employee_raw(conn: &Connection, name: &str) -> i64 {
    add_employee_with_hash(conn, name, "placeholder")
}

/// Insert a closed punch row directly, bypassing the orchestrator.
pub fn insert_closed_punch(conn: &Connection, employee_id: i64, clock_in: &str, clock_out: &str) {
    conn.execute(
        "INSERT INTO punches(employee_id, clock_in, clock_out, method, note)
         VALUES(?1, ?2, ?3, 'kiosk', NULL)",
        params![employee_id, clock_in, clock_out],
    )
    .expect("insert closed punch");
}

/// Insert an open punch row directly, bypassing the orchestrator.
pub fn insert_open_punch_raw(conn: &Connection, employee_id: i64, clock_in: &str) {
    conn.execute(
        "INSERT INTO punches(employee_id, clock_in, clock_out, method, note)
         VALUES(?1, ?2, NULL, 'kiosk', NULL)",
        params![employee_id, clock_in],
    )
    .expect("insert open punch");
}

pub fn utc(s: &str) -> chrono::DateTime<chrono::Utc> {
    punchpad::utils::time::parse_utc(s).expect("parse test timestamp")
}
