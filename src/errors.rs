//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Queue
    // ---------------------------
    #[error("Queue serialization error: {0}")]
    Queue(#[from] serde_json::Error),

    // ---------------------------
    // Punch invariants
    // ---------------------------
    #[error("Open punch already exists for employee {0}")]
    OpenPunchExists(i64),

    #[error("No open punch for employee {0}")]
    OpenPunchMissing(i64),

    #[error("Employee {employee_id} has {count} open punches; expected exactly one")]
    OpenPunchConflict { employee_id: i64, count: usize },

    // ---------------------------
    // Lookup / parsing errors
    // ---------------------------
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
