//! Attribute registry: the functions that resolve template placeholders.
//!
//! Built-in attributes:
//!
//! | attribute | value |
//! |---|---|
//! | `ascTime` | event time in `timestamp_format`, or whole seconds since start with `short_timestamp` |
//! | `fields` | `" key=value"` pairs, keys colorized, sorted unless `disable_sorting` |
//! | `levelName` | upper-cased level name (`WARNING`), colorized |
//! | `shortLevelName` | first four letters of the level name (`WARN`), colorized |
//! | `name` | the reserved `name` field, or empty |
//! | `message` | the log message |
//! | `process` | current process id |
//! | `relativeCreated` | whole seconds since the formatter was created |
//!
//! Callers extend or override these with [`CustomHandlers`].

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use crate::color::colorize;
use crate::event::{Event, NAME_FIELD, Value, format_value};
use crate::formatter::Formatter;

/// Error type a handler may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Resolves one placeholder from an event and the formatter's settings.
pub type Handler = Arc<dyn Fn(&Event, &Formatter) -> Result<Value, HandlerError> + Send + Sync>;

/// Caller-supplied handlers keyed by attribute name. These take precedence
/// over built-ins of the same name.
pub type CustomHandlers = HashMap<String, Handler>;

type BuiltinFn = fn(&Event, &Formatter) -> Result<Value, HandlerError>;

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("ascTime", asc_time),
    ("fields", fields),
    ("levelName", level_name),
    ("name", name),
    ("message", message),
    ("process", process),
    ("relativeCreated", relative_created),
    ("shortLevelName", short_level_name),
];

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Event, &Formatter) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Look up a built-in handler by attribute name.
pub fn builtin(attribute: &str) -> Option<Handler> {
    BUILTINS
        .iter()
        .find(|(name, _)| *name == attribute)
        .map(|(_, f)| handler(*f))
}

/// Names of every built-in attribute.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// Timestamp of the event, or seconds since start in short-timestamp mode.
pub fn asc_time(event: &Event, formatter: &Formatter) -> Result<Value, HandlerError> {
    if formatter.short_timestamp {
        return Ok(Value::Uint(formatter.elapsed_secs()));
    }
    let formatted = event
        .time
        .format_in(&formatter.timestamp_format, &formatter.time_zone)?;
    Ok(Value::Str(formatted))
}

/// Event fields as `" key=value"` pairs with colorized keys.
///
/// The `name` field is skipped when the template prints it through `%[name]s`.
pub fn fields(event: &Event, formatter: &Formatter) -> Result<Value, HandlerError> {
    let skip_name = formatter.attributes().contains(NAME_FIELD);
    let mut keys: Vec<&String> = event
        .fields
        .keys()
        .filter(|key| !(skip_name && key.as_str() == NAME_FIELD))
        .collect();
    if !formatter.disable_sorting {
        keys.sort_unstable();
    }

    let mut out = String::new();
    for key in keys {
        let value = format_value(&event.fields[key]);
        let _ = write!(out, " {}={value}", colorize(event, formatter, key));
    }
    Ok(Value::Str(out))
}

pub fn level_name(event: &Event, formatter: &Formatter) -> Result<Value, HandlerError> {
    Ok(Value::Str(colorize(event, formatter, event.level.name())))
}

pub fn short_level_name(event: &Event, formatter: &Formatter) -> Result<Value, HandlerError> {
    Ok(Value::Str(colorize(event, formatter, event.level.short_name())))
}

/// Value of the reserved `name` field.
pub fn name(event: &Event, _: &Formatter) -> Result<Value, HandlerError> {
    Ok(Value::Str(
        event
            .fields
            .get(NAME_FIELD)
            .map(format_value)
            .unwrap_or_default(),
    ))
}

pub fn message(event: &Event, _: &Formatter) -> Result<Value, HandlerError> {
    Ok(Value::Str(event.message.clone()))
}

pub fn process(_: &Event, _: &Formatter) -> Result<Value, HandlerError> {
    Ok(Value::Uint(u64::from(std::process::id())))
}

pub fn relative_created(_: &Event, formatter: &Formatter) -> Result<Value, HandlerError> {
    Ok(Value::Uint(formatter.elapsed_secs()))
}
