//! Day-level date arithmetic.
//!
//! Everything in the calculator works on calendar days. `NaiveDate` carries
//! no time-of-day and no zone, so a one-day shift is always exactly one
//! calendar day regardless of daylight-saving transitions.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_DATE: &str = "%Y-%m-%d";

/// Formats accepted for date-times whose time component gets dropped.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Shift `date` by `n` calendar days (`n` may be negative).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + chrono::Duration::days(n)
}

/// Like [`add_days`], but `None` when the result leaves chrono's date range.
pub fn checked_add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    let days = chrono::Days::new(n.unsigned_abs());
    if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Render `date` as `YYYY-MM-DD`.
pub fn to_iso_date_string(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parse a calendar date, discarding any time-of-day component.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps (the date is taken as
/// written, before any offset conversion) and naive `T`/space separated
/// date-times.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    let plain = NaiveDate::parse_from_str(s, ISO_DATE);
    if plain.is_ok() {
        return plain;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().date());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    plain
}
