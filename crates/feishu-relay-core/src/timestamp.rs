//! Timestamp normalisation and duration formatting.
//!
//! GitHub documents `started_at` / `completed_at` as ISO-8601 strings, but
//! payload variants with epoch numbers (seconds or milliseconds) exist in the
//! wild. [`JobTimestamp`] accepts all three shapes and normalises to UTC;
//! anything that cannot be normalised degrades to the `"N/A"` duration
//! sentinel rather than failing the request.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Rendered in place of a duration that could not be computed.
pub const DURATION_UNAVAILABLE: &str = "N/A";

/// Epoch values at or above this magnitude are interpreted as milliseconds.
///
/// 10^12 seconds is roughly the year 33658, while 10^12 milliseconds is
/// September 2001, so the ranges do not overlap for any plausible timestamp.
const EPOCH_MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// A job timestamp in any of the formats the payload may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobTimestamp {
    /// ISO-8601 / RFC 3339 string, e.g. `"2024-01-01T00:02:05Z"`.
    Text(String),
    /// Epoch seconds or milliseconds.
    Integer(i64),
    /// Epoch seconds or milliseconds with a fractional part.
    Float(f64),
}

impl JobTimestamp {
    /// Normalise to a UTC instant.
    ///
    /// Returns `None` when the value cannot be interpreted as a timestamp;
    /// callers treat that as the `"N/A"` case, never as an error.
    pub fn normalize(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Integer(n) => {
                if n.abs() >= EPOCH_MILLIS_THRESHOLD {
                    Utc.timestamp_millis_opt(*n).single()
                } else {
                    Utc.timestamp_opt(*n, 0).single()
                }
            }
            Self::Float(f) => {
                if !f.is_finite() {
                    return None;
                }
                let millis = if f.abs() >= EPOCH_MILLIS_THRESHOLD as f64 {
                    *f
                } else {
                    f * 1000.0
                };
                Utc.timestamp_millis_opt(millis.round() as i64).single()
            }
        }
    }
}

/// Format the elapsed time between two job timestamps as `"{m}m {s}s"`.
///
/// Either endpoint missing, unparseable, or a negative span renders as
/// [`DURATION_UNAVAILABLE`]. Sub-second remainders are rounded to the nearest
/// second.
pub fn format_duration(start: Option<&JobTimestamp>, end: Option<&JobTimestamp>) -> String {
    let (Some(start), Some(end)) = (
        start.and_then(JobTimestamp::normalize),
        end.and_then(JobTimestamp::normalize),
    ) else {
        return DURATION_UNAVAILABLE.to_string();
    };

    let millis = (end - start).num_milliseconds();
    if millis < 0 {
        return DURATION_UNAVAILABLE.to_string();
    }

    let seconds = ((millis as f64) / 1000.0).round() as i64;
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
