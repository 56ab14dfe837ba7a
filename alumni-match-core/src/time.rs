//! Time source and timestamp parsing.
//!
//! Activity records carry raw timestamp strings. A missing or unparsable
//! timestamp resolves to the current instant supplied by a [`Clock`] rather
//! than failing the calculation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Supply the instant treated as "now" by time-windowed calculations.
///
/// Implementations must be thread-safe so scorers holding a clock can be
/// shared across threads.
pub trait Clock: Send + Sync {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp.
///
/// Offsets are honoured; naive date-times and bare dates are read as UTC.
/// Returns `None` when no supported layout matches.
///
/// # Examples
/// ```
/// use alumni_match_core::parse_timestamp;
///
/// assert!(parse_timestamp("2024-11-15T10:00:00Z").is_some());
/// assert!(parse_timestamp("2024-11-15 10:00:00.250").is_some());
/// assert!(parse_timestamp("2024-11-15").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Resolve an optional raw timestamp, falling back to `now`.
#[must_use]
pub fn resolve_or_now(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    match raw {
        None => now,
        Some(value) => parse_timestamp(value).unwrap_or_else(|| {
            log::debug!("unparsable timestamp {value:?}; treating it as now");
            now
        }),
    }
}
