use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{EventGateError, Result};

/// Resolved instant. Every resolver takes one of these explicitly as `now`.
pub type Timestamp = DateTime<Utc>;

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T09:00:00Z`, `2025-03-01T09:00:00+02:00`) and,
/// because some feeds drop the offset, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// which is read as UTC. Anything else is `MalformedTimestamp`.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EventGateError::MalformedTimestamp(raw.to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| EventGateError::MalformedTimestamp(raw.to_string()))
}
