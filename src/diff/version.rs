//! Parsing of the version and timestamp fields used by the classifier.

use crate::model::RawVersion;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which snapshot a field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Old,
    New,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// Error parsing `x_mitre_version`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("missing x_mitre_version")]
    Missing,
    #[error("x_mitre_version '{0}' is not a number")]
    Invalid(String),
}

/// Error parsing `modified`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampParseError {
    #[error("missing modified timestamp")]
    Missing,
    #[error("modified timestamp '{0}' is not a valid date")]
    Invalid(String),
}

/// Parse a record version as a floating-point number.
pub fn parse_version(raw: Option<&RawVersion>) -> Result<f64, VersionParseError> {
    match raw {
        None => Err(VersionParseError::Missing),
        Some(RawVersion::Number(n)) => Ok(*n),
        Some(RawVersion::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| VersionParseError::Invalid(s.clone())),
        Some(other @ RawVersion::Other(_)) => Err(VersionParseError::Invalid(other.to_string())),
    }
}

/// Formats accepted after RFC 3339, most specific first.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a modification timestamp into UTC.
///
/// Accepts RFC 3339 (`2020-06-01T12:00:00.000Z`), the space-separated form
/// with or without offset, and bare dates (`2020-06-01`, midnight UTC).
pub fn parse_timestamp(raw: Option<&str>) -> Result<DateTime<Utc>, TimestampParseError> {
    let Some(raw) = raw else {
        return Err(TimestampParseError::Missing);
    };
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(TimestampParseError::Invalid(raw.to_string()))
}
