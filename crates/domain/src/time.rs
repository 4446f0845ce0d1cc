//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for appointment schedules.
pub type Timestamp = DateTime<Utc>;

/// Naive layouts accepted in addition to RFC 3339, as sent by
/// `<input type="datetime-local">` and hand-written clients.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a schedule timestamp.
///
/// RFC 3339 input keeps its offset and is converted to UTC. Naive input
/// (no offset) is taken to already be UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateTime`] when no accepted layout matches.
pub fn parse_date_time(value: &str) -> Result<Timestamp, ValidationError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.to_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ValidationError::InvalidDateTime(value.to_owned()))
}
