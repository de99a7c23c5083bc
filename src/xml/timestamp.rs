//! ISO-8601 rendering of header timestamps (seconds since the Unix epoch, UTC).

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{Result, TelemetryXmlError};

/// Offset-less layouts written by older tools; read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Convert epoch seconds to a UTC instant, rounded to the microsecond
pub fn to_datetime(seconds: f64) -> Result<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(TelemetryXmlError::InvalidTimestamp(format!("{} seconds", seconds)));
    }
    let micros = (seconds * 1_000_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return Err(TelemetryXmlError::InvalidTimestamp(format!("{} seconds is out of range", seconds)));
    }
    DateTime::from_timestamp_micros(micros as i64)
        .ok_or_else(|| TelemetryXmlError::InvalidTimestamp(format!("{} seconds is out of range", seconds)))
}

/// Convert a UTC instant back to epoch seconds
pub fn from_datetime(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / 1e9
}

/// Format epoch seconds as `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`
pub fn format_timestamp(seconds: f64) -> Result<String> {
    Ok(format_datetime(&to_datetime(seconds)?))
}

/// Format a UTC instant with only as many fractional digits as it needs
pub fn format_datetime(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO-8601 instant to a UTC instant
///
/// Offsets other than UTC are normalised; text without an offset is taken to
/// be UTC.
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TelemetryXmlError::InvalidTimestamp(format!("'{}' is not an ISO-8601 instant", text)))
}

/// Parse an ISO-8601 instant to epoch seconds
pub fn parse_timestamp(text: &str) -> Result<f64> {
    parse_datetime(text).map(|instant| from_datetime(&instant))
}
