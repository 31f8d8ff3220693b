//! OData v2 date literal reformatting.
//!
//! The Bill of Material service serialises `Edm.DateTime` values as
//! `/Date(<milliseconds since epoch>)/`, optionally followed by an offset such
//! as `+0000` inside the parentheses.

use chrono::{NaiveDate, TimeZone, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an OData v2 date literal into a calendar date (UTC).
pub fn parse_odata_date(value: &str) -> Option<NaiveDate> {
    let inner = value
        .trim()
        .strip_prefix("/Date(")?
        .strip_suffix(")/")?;

    // Offset sign can only follow the first digit; a leading '-' is a negative timestamp.
    let millis_end = inner
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '+' || *c == '-')
        .map(|(i, _)| i)
        .unwrap_or(inner.len());

    let millis: i64 = inner[..millis_end].parse().ok()?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

/// Reformats an OData date literal as `YYYY-MM-DD`.
///
/// Values that are not OData date literals (including empty strings) are
/// returned unchanged.
pub fn reformat_odata_date(value: &str) -> String {
    match parse_odata_date(value) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}
