//! Time utility functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Naive formats accepted for timestamp literals, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Date-only format for timestamp literals (midnight UTC)
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a filter timestamp literal using locale-invariant formats.
///
/// Accepted, in order: RFC 3339, naive ISO date-time (`T` or space separator,
/// optional fractional seconds) and plain `YYYY-MM-DD`. Naive values are UTC.
/// The error returned is from the RFC 3339 attempt.
pub fn parse_timestamp_literal(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();

    let rfc3339_err = match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT)
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(rfc3339_err)
}

/// Convert nanoseconds since Unix epoch to DateTime<Utc>
pub fn nanos_to_datetime(nanos: u64) -> DateTime<Utc> {
    let secs = (nanos / 1_000_000_000) as i64;
    let nsecs = (nanos % 1_000_000_000) as u32;
    Utc.timestamp_opt(secs, nsecs).single().unwrap_or_else(|| {
        tracing::warn!(nanos, "Invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_literal_rfc3339() {
        let dt = parse_timestamp_literal("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_literal_with_offset() {
        let dt = parse_timestamp_literal("2024-01-15T10:30:00+05:00").unwrap();
        // 10:30 at +05:00 is 05:30 UTC
        assert_eq!(dt.hour(), 5);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_literal_naive_is_utc() {
        let t = parse_timestamp_literal("2024-01-15T10:30:00").unwrap();
        let space = parse_timestamp_literal("2024-01-15 10:30:00").unwrap();
        assert_eq!(t, space);
        assert_eq!(t.hour(), 10);
    }

    #[test]
    fn test_parse_literal_fractional_seconds() {
        let dt = parse_timestamp_literal("2024-01-15 10:30:00.250").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_literal_date_only() {
        let dt = parse_timestamp_literal(" 2024-01-15 ").unwrap();
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_parse_literal_invalid() {
        assert!(parse_timestamp_literal("not-a-date").is_err());
        assert!(parse_timestamp_literal("").is_err());
        assert!(parse_timestamp_literal("15/01/2024").is_err());
    }

    #[test]
    fn test_nanos_to_datetime_known_value() {
        // 2024-01-01 00:00:00 UTC = 1704067200 seconds
        let nanos = 1704067200_u64 * 1_000_000_000;
        let dt = nanos_to_datetime(nanos);
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_nanos_to_datetime_with_subsecond() {
        let nanos = 1_500_000_000;
        let dt = nanos_to_datetime(nanos);
        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.timestamp_subsec_nanos(), 500_000_000);
    }
}
