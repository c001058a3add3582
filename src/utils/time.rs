//! Time utilities: the canonical UTC timestamp format, parsing helpers,
//! and duration formatting.
//!
//! Every timestamp stored in the database or the queue uses the fixed
//! `YYYY-MM-DDTHH:MM:SSZ` form, so lexicographic comparison in SQL matches
//! chronological order.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.format(UTC_FORMAT).to_string()
}

/// Parse a canonical `...Z` timestamp; falls back to RFC 3339 with an offset.
pub fn parse_utc(s: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, UTC_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Start of a calendar day as a canonical UTC timestamp string.
pub fn day_start(day: NaiveDate) -> String {
    format!("{}T00:00:00Z", day.format("%Y-%m-%d"))
}

/// Exclusive end bound of a calendar day (start of the next day).
pub fn day_end(day: NaiveDate) -> String {
    day_start(day + Duration::days(1))
}

/// Interpret a CLI bound as either a date (`YYYY-MM-DD`) or a full timestamp.
pub fn parse_bound(s: &str) -> AppResult<String> {
    if let Ok(day) = parse_date(s) {
        return Ok(day_start(day));
    }
    parse_utc(s).map(format_utc)
}

pub fn seconds_between(start: &str, end: &str) -> AppResult<i64> {
    let s = parse_utc(start)?;
    let e = parse_utc(end)?;
    Ok((e - s).num_seconds())
}

/// Render a second count as `HH:MM`.
pub fn format_hhmm(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}", s / 3600, (s % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_round_trip() {
        let ts = parse_utc("2025-06-01T08:30:00Z").unwrap();
        assert_eq!(format_utc(ts), "2025-06-01T08:30:00Z");
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let ts = parse_utc("2025-06-01T10:30:00+02:00").unwrap();
        assert_eq!(format_utc(ts), "2025-06-01T08:30:00Z");
    }

    #[test]
    fn bounds_accept_dates_and_timestamps() {
        assert_eq!(parse_bound("2025-06-01").unwrap(), "2025-06-01T00:00:00Z");
        assert_eq!(
            parse_bound("2025-06-01T12:00:00Z").unwrap(),
            "2025-06-01T12:00:00Z"
        );
        assert!(parse_bound("junk").is_err());
    }

    #[test]
    fn hhmm_formatting() {
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(3661), "01:01");
        assert_eq!(format_hhmm(-5), "00:00");
    }
}
