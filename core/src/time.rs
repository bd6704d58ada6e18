//! Time related utils.

use chrono::Utc;

use crate::Error;
use crate::Result;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Get the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a date into an HTTP date, RFC 1123 with the zone spelled `GMT`.
///
/// e.g. `Mon, 02 Jan 2006 15:04:05 GMT`
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an RFC 2822 date, the format HTTP `Date` headers carry.
pub fn parse_rfc2822(s: &str) -> Result<DateTime> {
    match chrono::DateTime::parse_from_rfc2822(s) {
        Ok(t) => Ok(t.with_timezone(&Utc)),
        Err(e) => Err(Error::unexpected(format!("parsing '{s}' as rfc2822 failed")).with_source(e)),
    }
}
