use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// File-level configuration: where the database and queue live, and the
/// default source identifier this station reports for audit and lockout.
/// Tunable punch policy lives in the settings table, not here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub queue_file: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    env::var("HOSTNAME").unwrap_or_else(|_| "kiosk".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            queue_file: Self::queue_file_path().to_string_lossy().to_string(),
            source: default_source(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("punchpad")
        } else if let Some(home) = dirs::home_dir() {
            home.join(".punchpad")
        } else {
            PathBuf::from(".punchpad")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchpad.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("punchpad.sqlite")
    }

    pub fn queue_file_path() -> PathBuf {
        Self::config_dir().join("punch_queue.ndjson")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
    }

    /// Initialize configuration and data files. `is_test` skips writing the
    /// config file so test runs never touch the real home directory.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let mut config = Self::default();
        if let Some(db) = custom_db {
            config.database = db.to_string();
            // Keep the queue next to a custom database.
            config.queue_file = format!("{db}.queue.ndjson");
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
