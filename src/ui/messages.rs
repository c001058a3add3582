use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Kiosk result banner kinds. Every punch outcome maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    OkIn,
    OkOut,
    Blocked,
    Locked,
    Error,
}

impl Banner {
    fn title(&self) -> &'static str {
        match self {
            Banner::OkIn => "PUNCHED IN",
            Banner::OkOut => "PUNCHED OUT",
            Banner::Blocked => "Duplicate punch blocked",
            Banner::Locked => "Locked",
            Banner::Error => "Error",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Banner::OkIn => FG_GREEN,
            Banner::OkOut => FG_BLUE,
            Banner::Blocked => FG_YELLOW,
            Banner::Locked | Banner::Error => FG_RED,
        }
    }
}

/// Render a framed kiosk banner as a single string payload.
pub fn render_banner(kind: Banner, line1: &str, line2: Option<&str>) -> String {
    let title = kind.title();
    let width = title.len().max(line1.len()).max(line2.map_or(0, str::len)) + 8;
    let border = "=".repeat(width.max(30));

    let mut out = String::new();
    out.push_str(&format!("{}{}{}{}\n", kind.color(), BOLD, border, RESET));
    out.push_str(&format!("{}{}{}{}\n", kind.color(), BOLD, title, RESET));
    out.push('\n');
    out.push_str(line1);
    out.push('\n');
    if let Some(line2) = line2 {
        out.push_str(line2);
        out.push('\n');
    }
    out.push_str(&format!("{}{}{}{}\n", kind.color(), BOLD, border, RESET));
    out
}

pub fn print_banner(kind: Banner, line1: &str, line2: Option<&str>) {
    print!("{}", render_banner(kind, line1, line2));
}
