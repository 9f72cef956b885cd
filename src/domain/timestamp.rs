//! ISO-8601 timestamp parsing shared by records and collections.
//!
//! New timestamps are written as RFC 3339 in UTC. Documents produced by
//! older tooling carry naive timestamps without an offset, which are read
//! as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses an RFC 3339 timestamp, falling back to a naive ISO-8601 one.
///
/// # Errors
///
/// Returns the naive parse error when neither form matches.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT).map(|naive| naive.and_utc()))
}

/// Serde adapter for `#[serde(deserialize_with = "timestamp::deserialize")]`.
///
/// # Errors
///
/// Fails when the value is not a string or not a recognizable timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
