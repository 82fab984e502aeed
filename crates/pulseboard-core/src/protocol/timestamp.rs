//! RFC 3339 timestamps with millisecond precision (`2026-01-02T03:04:05.678Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub fn format(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `serialize_with` adapter.
pub fn serialize<S>(at: &DateTime<Utc>, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format(at))
}
