//! Log level representation with parsing and display names.
//!
//! Names follow the logrus convention used by template attributes:
//! `%[levelName]s` prints the full upper-cased name (`WARNING`) and
//! `%[shortLevelName]s` its first four characters (`WARN`).

use std::fmt;

/// Canonical log level enumeration.
///
/// Ordered by severity (ascending) for `>=` filtering via [`Ord`].
/// Each variant has a numeric discriminant matching the bunyan/pino convention,
/// with [`Panic`](Self::Panic) one step above [`Fatal`](Self::Fatal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace = 10,
    Debug = 20,
    Info = 30,
    Warn = 40,
    Error = 50,
    Fatal = 60,
    Panic = 70,
}

impl Level {
    /// All levels in ascending severity.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
    ];

    /// Lower-case level name (e.g. `"warning"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Upper-cased full level name (e.g. `"WARNING"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Panic => "PANIC",
        }
    }

    /// First four characters of [`name`](Self::name) (e.g. `"DEBU"`, `"WARN"`).
    pub fn short_name(self) -> &'static str {
        let name = self.name();
        &name[..name.len().min(4)]
    }

    /// Parse a string into a [`Level`], case-insensitive.
    ///
    /// Returns `None` for unrecognized strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" | "trc" => Some(Self::Trace),
            "debug" | "dbg" => Some(Self::Debug),
            "info" | "inf" | "information" => Some(Self::Info),
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" | "fatal_error" => Some(Self::Error),
            "fatal" | "critical" | "crit" | "emerg" | "emergency" => Some(Self::Fatal),
            "panic" => Some(Self::Panic),
            _ => None,
        }
    }

    /// Parse a numeric value into a [`Level`] using nearest-match rounding.
    ///
    /// Uses bunyan/pino numeric convention:
    /// - 10 = trace, 20 = debug, 30 = info, 40 = warn, 50 = error, 60 = fatal
    ///
    /// Values between thresholds round to the nearest lower level; anything
    /// at or above 65 is a panic.
    pub const fn from_numeric(n: i64) -> Self {
        match n {
            ..=14 => Self::Trace,
            15..=24 => Self::Debug,
            25..=34 => Self::Info,
            35..=44 => Self::Warn,
            45..=54 => Self::Error,
            55..=64 => Self::Fatal,
            65.. => Self::Panic,
        }
    }

    /// Parse a level from a [`serde_json::Value`].
    ///
    /// Handles both string and numeric representations.
    pub fn from_json_value(
        value: &serde_json::Value,
        custom_aliases: Option<&std::collections::HashMap<String, Self>>,
    ) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => {
                // Check custom aliases first
                if let Some(aliases) = custom_aliases
                    && let Some(level) = aliases.get(&s.to_lowercase())
                {
                    return Some(*level);
                }
                Self::from_str_loose(s)
            }
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::from_numeric(i))
                } else {
                    #[allow(clippy::cast_possible_truncation)]
                    n.as_f64().map(|f| Self::from_numeric(f as i64))
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
