//! Timestamp parsing and formatting for log events.
//!
//! Events carry a [`Timestamp`] that the `ascTime` attribute renders with a
//! strftime-compatible format in the formatter's time zone. The CLI host also
//! parses timestamps out of JSON log lines: ISO 8601, RFC 3339,
//! `YYYY-MM-DD HH:MM:SS` strings, and numeric Unix epochs (seconds,
//! milliseconds, nanoseconds) using a magnitude-based heuristic.

use std::fmt;

use jiff::tz::TimeZone;

/// Default display format, matching `2026-01-15 10:30:00.123`.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Point in time attached to a log event.
///
/// Wraps a [`jiff::Timestamp`] for high-precision time handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    /// Normalized timestamp value.
    pub value: jiff::Timestamp,
}

impl Timestamp {
    /// The current system time.
    pub fn now() -> Self {
        Self {
            value: jiff::Timestamp::now(),
        }
    }

    /// Format the timestamp in `tz` using the given strftime-compatible format string.
    ///
    /// Fails when `format` contains an invalid or incomplete directive.
    pub fn format_in(&self, format: &str, tz: &TimeZone) -> Result<String, jiff::Error> {
        let zdt = self.value.to_zoned(tz.clone());
        jiff::fmt::strtime::format(format, &zdt)
    }

    /// Format the timestamp in UTC using the given strftime-compatible format string.
    pub fn format_with(&self, format: &str) -> Result<String, jiff::Error> {
        self.format_in(format, &TimeZone::UTC)
    }

    /// Format the timestamp in UTC using [`DEFAULT_FORMAT`].
    pub fn format_display(&self) -> String {
        self.format_with(DEFAULT_FORMAT).unwrap_or_default()
    }

    /// Parse a timestamp from a [`serde_json::Value`].
    ///
    /// Supports:
    /// - ISO 8601 / RFC 3339 strings
    /// - `YYYY-MM-DD HH:MM:SS` format
    /// - Unix epoch seconds (integer or float)
    /// - Unix epoch milliseconds (integer)
    /// - Unix epoch nanoseconds (integer)
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse_string(s),
            serde_json::Value::Number(n) => Self::parse_number(n),
            _ => None,
        }
    }

    /// Parse a string timestamp.
    fn parse_string(s: &str) -> Option<Self> {
        // Try ISO 8601 / RFC 3339; jiff handles these natively
        if let Ok(ts) = s.parse::<jiff::Timestamp>() {
            return Some(Self { value: ts });
        }

        // Try YYYY-MM-DD HH:MM:SS (no timezone → assume UTC)
        if let Ok(dt) = jiff::civil::DateTime::strptime("%Y-%m-%d %H:%M:%S", s)
            && let Ok(ts) = dt.to_zoned(jiff::tz::TimeZone::UTC)
        {
            return Some(Self {
                value: ts.timestamp(),
            });
        }

        // Try YYYY-MM-DD HH:MM:SS.fff
        if let Ok(dt) = jiff::civil::DateTime::strptime("%Y-%m-%d %H:%M:%S%.f", s)
            && let Ok(ts) = dt.to_zoned(jiff::tz::TimeZone::UTC)
        {
            return Some(Self {
                value: ts.timestamp(),
            });
        }

        None
    }

    /// Parse a numeric timestamp using the heuristic:
    /// - Value < 1e12 → seconds
    /// - Value < 1e15 → milliseconds
    /// - Value ≥ 1e15 → nanoseconds
    fn parse_number(n: &serde_json::Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Self::from_epoch_integer(i)
        } else if let Some(f) = n.as_f64() {
            Self::from_epoch_float(f)
        } else {
            None
        }
    }

    fn from_epoch_integer(value: i64) -> Option<Self> {
        let ts = if value < 1_000_000_000_000 {
            // seconds
            jiff::Timestamp::from_second(value).ok()?
        } else if value < 1_000_000_000_000_000 {
            // milliseconds
            jiff::Timestamp::from_millisecond(value).ok()?
        } else {
            // nanoseconds
            jiff::Timestamp::from_nanosecond(i128::from(value)).ok()?
        };
        Some(Self { value: ts })
    }

    fn from_epoch_float(value: f64) -> Option<Self> {
        if value < 1e12 {
            // seconds with fractional part
            #[allow(clippy::cast_possible_truncation)]
            let secs = value.trunc() as i64;
            #[allow(clippy::cast_possible_truncation)]
            let nanos = ((value.fract()) * 1_000_000_000.0) as i32;
            let ts = jiff::Timestamp::new(secs, nanos).ok()?;
            Some(Self { value: ts })
        } else {
            // milliseconds as float
            #[allow(clippy::cast_possible_truncation)]
            let ms = value as i64;
            let ts = jiff::Timestamp::from_millisecond(ms).ok()?;
            Some(Self { value: ts })
        }
    }
}

impl From<jiff::Timestamp> for Timestamp {
    fn from(value: jiff::Timestamp) -> Self {
        Self { value }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_display())
    }
}
