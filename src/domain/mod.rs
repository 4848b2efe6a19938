//! Domain records exchanged with the upstream online test API.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub mod book;
pub mod page;
pub mod qanda;
pub mod topic;
pub mod types;
pub mod user;

/// Formats an upstream timestamp as `YYYY-MM-DD`.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` and plain dates; anything
/// else is returned unchanged.
pub fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
