use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Error, Result};

/// Zone-less layout written by some older log producers; read as UTC
const NAIVE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a log timestamp.
///
/// RFC 3339 with optional fractional seconds is tried first, then a
/// zone-less seconds layout assumed to be UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, NAIVE_LAYOUT) {
        return Ok(naive.and_utc());
    }
    Err(Error::Timestamp(value.to_string()))
}

/// Missing and empty values map to `None` rather than an error
pub fn parse_optional_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_timestamp(v).map(Some),
    }
}
