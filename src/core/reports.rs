//! Report aggregation on top of the punch store's interval queries.
//! All bucketing is by UTC calendar day over half-open bounds.

use crate::db::punches::total_seconds_worked;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{day_end, day_start, parse_date};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use std::path::Path;

/// Seconds worked per day for `[start_day, end_day)`. Days with no closed
/// punches are present with a zero total so exports have a complete grid.
pub fn daily_totals(
    conn: &Connection,
    employee_id: i64,
    start_day: NaiveDate,
    end_day: NaiveDate,
) -> AppResult<Vec<(NaiveDate, i64)>> {
    let mut totals = Vec::new();
    let mut day = start_day;
    while day < end_day {
        let secs = total_seconds_worked(conn, employee_id, &day_start(day), &day_end(day))?;
        totals.push((day, secs));
        day += Duration::days(1);
    }
    Ok(totals)
}

pub fn period_total(
    conn: &Connection,
    employee_id: i64,
    start_day: &str,
    end_day: &str,
) -> AppResult<i64> {
    let start = day_start(parse_date(start_day)?);
    let end = day_start(parse_date(end_day)?);
    total_seconds_worked(conn, employee_id, &start, &end)
}

/// Write daily totals as CSV: `date,employee_id,seconds`.
pub fn daily_totals_to_csv(
    path: &Path,
    employee_id: i64,
    totals: &[(NaiveDate, i64)],
) -> AppResult<()> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    writer
        .write_record(["date", "employee_id", "seconds"])
        .map_err(|e| AppError::Export(e.to_string()))?;
    for (day, secs) in totals {
        writer
            .write_record([
                day.format("%Y-%m-%d").to_string(),
                employee_id.to_string(),
                secs.to_string(),
            ])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
