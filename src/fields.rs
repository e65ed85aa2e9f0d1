//! Alias tables the CLI host uses to pick reserved fields out of JSON records.
//!
//! Aliases are ordered by how common they are across logging frameworks
//! (logrus, zap, slog, pino, bunyan, structlog). First match wins.

use serde_json::{Map, Value};

pub const TIMESTAMP_ALIASES: &[&str] = &[
    "time",
    "ts",
    "timestamp",
    "@timestamp",
    "datetime",
    "date",
    "t",
    "logged_at",
    "created_at",
];

pub const LEVEL_ALIASES: &[&str] = &[
    "level",
    "severity",
    "loglevel",
    "log_level",
    "lvl",
    "priority",
    "log.level",
];

pub const MESSAGE_ALIASES: &[&str] = &[
    "msg",
    "message",
    "text",
    "log",
    "body",
    "event",
    "short_message",
];

/// Keys that carry the logger name, which becomes the `name` field.
pub const LOGGER_ALIASES: &[&str] = &["logger", "name", "logger_name", "component", "module"];

/// Remove and return the value under `key` if given, otherwise under the
/// first alias present in `map`.
///
/// An explicit key never falls back to the alias table.
pub fn take(map: &mut Map<String, Value>, key: Option<&str>, aliases: &[&str]) -> Option<Value> {
    match key {
        Some(key) => map.remove(key),
        None => aliases.iter().find_map(|alias| map.remove(*alias)),
    }
}
