//! Calendar-date helpers for CMS content.
//!
//! `date` fields arrive as bare `YYYY-MM-DD` strings. Reading one as an
//! instant (UTC midnight) shows the previous day anywhere west of UTC, so
//! dates are built from their components and kept as calendar days.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::fmt::Write;

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Returns `None` for anything that is not three integer segments naming a
/// real day; never panics.
pub fn parse_local_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.trim().split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Local midnight at the start of `date`.
///
/// `None` only when midnight does not exist locally (a DST gap at 00:00).
pub fn to_local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()
}

/// Format a CMS date string with a strftime pattern, or return `fallback`.
pub fn format_local_date(input: Option<&str>, pattern: &str, fallback: &str) -> String {
    let Some(date) = input.and_then(parse_local_date) else {
        return fallback.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return fallback.to_string();
    }
    out
}

/// Parse a CMS `datetime` field (RFC 3339).
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a CMS `datetime` field as a calendar day in the local zone.
pub fn format_datetime_local(input: Option<&str>, pattern: &str, fallback: &str) -> String {
    let Some(instant) = input.and_then(parse_datetime) else {
        return fallback.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", instant.with_timezone(&Local).format(pattern)).is_err() {
        return fallback.to_string();
    }
    out
}
