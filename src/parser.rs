//! JSON log line parser for the `lcf` binary.
//!
//! Turns stdin lines into [`Event`]s by auto-detecting the timestamp, level,
//! message and logger-name fields. Supports pure JSON lines, lines with a
//! non-JSON prefix before a JSON object (embedded JSON), and plain text
//! passthrough.

use crate::config::Config;
use crate::event::{Event, Fields, NAME_FIELD};
use crate::fields;
use crate::level::Level;
use crate::timestamp::Timestamp;

/// The parsed classification of a stdin line.
#[derive(Debug)]
pub enum LineKind {
    /// Entire line is a valid JSON object.
    Json(Record),
    /// Line has non-JSON text before a valid JSON object.
    EmbeddedJson { prefix: String, record: Record },
    /// Line contains no valid JSON; passed through unmodified.
    Raw,
}

/// An event extracted from one JSON object.
#[derive(Debug)]
pub struct Record {
    pub event: Event,
    /// False when the object had no recognizable level and
    /// [`Level::Info`] was assumed.
    pub level_known: bool,
}

impl Record {
    /// Whether the record falls below the configured minimum level.
    ///
    /// Records without a level are always shown.
    pub fn is_suppressed(&self, config: &Config) -> bool {
        match config.min_level {
            Some(min) if self.level_known => self.event.level < min,
            _ => false,
        }
    }
}

/// Parse a single line from stdin into a [`LineKind`].
///
/// Detection strategy:
/// 1. Lines starting with `{` → try parsing as JSON object
/// 2. Lines containing `{` → try embedded JSON (prefix + JSON)
/// 3. Everything else → [`LineKind::Raw`] (passthrough)
///
/// JSON arrays are treated as [`LineKind::Raw`] since they are not log entries.
pub fn parse_line(line: &str, config: &Config) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Raw;
    }

    if trimmed.starts_with('{') {
        return match try_parse_json(trimmed, config) {
            Some(record) => LineKind::Json(record),
            None => LineKind::Raw,
        };
    }

    if let Some(brace_pos) = trimmed.find('{')
        && let Some(record) = try_parse_json(&trimmed[brace_pos..], config)
    {
        let prefix = trimmed[..brace_pos].to_string();
        return LineKind::EmbeddedJson { prefix, record };
    }

    LineKind::Raw
}

fn try_parse_json(s: &str, config: &Config) -> Option<Record> {
    let serde_json::Value::Object(mut map) = serde_json::from_str::<serde_json::Value>(s).ok()? else {
        return None;
    };

    let time = fields::take(&mut map, config.timestamp_key.as_deref(), fields::TIMESTAMP_ALIASES)
        .and_then(|v| Timestamp::from_json_value(&v));
    let level = fields::take(&mut map, config.level_key.as_deref(), fields::LEVEL_ALIASES)
        .and_then(|v| Level::from_json_value(&v, config.level_aliases.as_ref()));
    let message = fields::take(&mut map, config.message_key.as_deref(), fields::MESSAGE_ALIASES)
        .and_then(value_to_string)
        .unwrap_or_default();
    let name = fields::take(&mut map, config.name_key.as_deref(), fields::LOGGER_ALIASES)
        .and_then(value_to_string);

    let mut extra = flatten_extra(map);
    if let Some(name) = name {
        extra.insert(NAME_FIELD.to_string(), name.into());
    }

    let mut event = Event::new(level.unwrap_or(Level::Info), message).with_fields(extra);
    if let Some(time) = time {
        event = event.at(time);
    }
    Some(Record {
        event,
        level_known: level.is_some(),
    })
}

fn value_to_string(v: serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Flatten nested objects one level using dot-notation.
///
/// `{"http":{"method":"GET"}}` becomes `http.method = "GET"`. Arrays and
/// deeper objects are kept as JSON values.
fn flatten_extra(map: serde_json::Map<String, serde_json::Value>) -> Fields {
    let mut result = Fields::with_capacity(map.len());
    for (key, value) in map {
        match value {
            serde_json::Value::Object(nested) => {
                for (nested_key, nested_value) in nested {
                    result.insert(format!("{key}.{nested_key}"), nested_value);
                }
            }
            other => {
                result.insert(key, other);
            }
        }
    }
    result
}
