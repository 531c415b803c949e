//! Timestamp formatting for log lines.

use chrono::{DateTime, Utc};

/// Represents a UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC time as an ISO 8601 string.
///
/// The format has millisecond precision and a `Z` suffix:
/// `YYYY-MM-DDTHH:MM:SS.mmmZ`
///
/// # Examples
///
/// ```
/// use utilkit::utils::iso_timestamp;
///
/// let ts = iso_timestamp();
/// assert!(ts.contains('T'));
/// assert!(ts.ends_with('Z'));
/// ```
#[must_use]
pub fn iso_timestamp() -> String {
    format_iso8601(&Utc::now())
}

/// Formats a timestamp as an ISO 8601 string with millisecond precision.
#[must_use]
pub fn format_iso8601(dt: &Timestamp) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
