// Stored timestamps are fixed-width UTC text so that string order equals time order.

use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, Utc};

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601 date-time with offset, or without offset (taken as UTC).
/// The UTC year must be in 0..=9999, otherwise [`format_utc`] would not be fixed-width.
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let ts = match DateTime::parse_from_rfc3339(s) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(_) => ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())?
            .and_utc(),
    };
    (0..=9999).contains(&ts.year()).then_some(ts)
}
