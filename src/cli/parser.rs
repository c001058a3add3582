use clap::{Parser, Subcommand};

/// Command-line interface definition for PunchPad
/// Kiosk punch clock with PIN lockout and a durable punch queue
#[derive(Parser)]
#[command(
    name = "punchpad",
    version = env!("CARGO_PKG_VERSION"),
    about = "Kiosk punch clock: PIN entry, durable punch queue, and SQLite-backed reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override queue file path
    #[arg(global = true, long = "queue")]
    pub queue: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, queue and configuration
    Init,

    /// Manage employees (create, disable, reset PIN, list)
    Employee {
        #[arg(long, help = "Create a new employee (requires --name and --pin)")]
        add: bool,

        #[arg(long, help = "Employee display name (with --add)")]
        name: Option<String>,

        #[arg(long, help = "Plaintext PIN to hash and store (with --add or --reset-pin)")]
        pin: Option<String>,

        #[arg(long, help = "Hourly pay rate (with --add)")]
        rate: Option<f64>,

        #[arg(long, value_name = "ID", help = "Disable an employee")]
        disable: Option<i64>,

        #[arg(long = "reset-pin", value_name = "ID", help = "Reset an employee's PIN")]
        reset_pin: Option<i64>,

        #[arg(long, help = "List employees (including disabled)")]
        list: bool,
    },

    /// Submit one PIN and toggle the matching employee's punch
    Punch {
        #[arg(long, help = "PIN to verify")]
        pin: String,

        #[arg(long, help = "Source identifier for audit/lockout (default from config)")]
        source: Option<String>,

        #[arg(long, help = "Optional note for the punch")]
        note: Option<String>,
    },

    /// Kiosk loop: read PINs from stdin with the reconciler running
    Kiosk {
        #[arg(long, help = "Source identifier for audit/lockout (default from config)")]
        source: Option<String>,

        #[arg(long, help = "Test mode: PIN to auto-enter once, then exit")]
        pin: Option<String>,
    },

    /// List events pending in the durable queue
    Queue,

    /// Run one synchronous reconcile cycle (drain the queue into the store)
    Reconcile,

    /// Report worked time for an employee
    Report {
        #[arg(long, help = "Employee ID")]
        emp: i64,

        #[arg(long, help = "Start day YYYY-MM-DD (inclusive)")]
        start: String,

        #[arg(long, help = "End day YYYY-MM-DD (exclusive)")]
        end: String,

        #[arg(long, help = "Show per-day totals instead of the period total")]
        daily: bool,

        #[arg(long, value_name = "FILE", help = "Write daily totals as CSV")]
        csv: Option<String>,
    },

    /// Read or write policy settings
    Setting {
        #[arg(long, value_name = "KEY")]
        get: Option<String>,

        #[arg(long, value_name = "KEY", requires = "value")]
        set: Option<String>,

        #[arg(long, value_name = "VALUE")]
        value: Option<String>,

        #[arg(long, help = "List all settings")]
        list: bool,
    },

    /// Print the audit log
    Audit {
        #[arg(long = "print", help = "Print rows from the audit log")]
        print: bool,
    },
}
