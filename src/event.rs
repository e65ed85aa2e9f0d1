//! Log events and the values resolvers produce from them.
//!
//! An [`Event`] is created by the host once per log call, read by every
//! resolver, and dropped after rendering. Resolvers turn it into [`Value`]s
//! which the positional formatter then substitutes into the template.

use std::collections::HashMap;
use std::fmt;

use crate::level::Level;
use crate::timestamp::Timestamp;

/// Key of the reserved logger-name field read by the `name` attribute.
pub const NAME_FIELD: &str = "name";

/// Structured key/value data attached to an event.
///
/// Iteration order is unspecified; the `fields` attribute sorts keys unless
/// sorting is disabled on the formatter.
pub type Fields = HashMap<String, serde_json::Value>;

/// One structured log record submitted to the formatter.
#[derive(Debug, Clone)]
pub struct Event {
    pub level: Level,
    pub message: String,
    pub time: Timestamp,
    pub fields: Fields,
}

impl Event {
    /// Create an event stamped with the current time and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Timestamp::now(),
            fields: Fields::new(),
        }
    }

    /// Builder-style helper to attach one field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builder-style helper to merge a set of fields, replacing existing keys.
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Builder-style helper to override the timestamp.
    #[must_use]
    pub fn at(mut self, time: impl Into<Timestamp>) -> Self {
        self.time = time.into();
        self
    }
}

/// Output of a resolver, consumed by one positional argument slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Short type name used in formatting errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Self::Uint(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Format a JSON field value for display.
///
/// - Strings: unquoted
/// - Numbers/bools: as-is
/// - Arrays and objects: compact JSON
/// - Null: "null"
pub fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
