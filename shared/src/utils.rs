// Timestamp helpers shared by the bar source and any presentation layer.
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

/// Converts bar milliseconds into a UTC datetime, `None` when out of range.
pub fn millis_to_datetime(ts_millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts_millis)
}

/// Parses either integer milliseconds ("1704067200000") or an RFC 3339
/// datetime ("2024-01-01T00:00:00Z") into milliseconds since the epoch.
pub fn parse_timestamp_millis(s: &str) -> Result<i64> {
    let trimmed = s.trim();
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Ok(ms);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
        .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", s, e))
}
