//! Render engine: run a compiled template's handlers and substitute the results.

use crate::error::LcfError;
use crate::event::{Event, Value};
use crate::formatter::Formatter;
use crate::sprintf;
use crate::template::CompiledTemplate;

/// Invoke every handler of `compiled` in slot order.
///
/// Stops at the first failing handler and reports which attribute it was
/// compiled from.
pub fn resolve(
    compiled: &CompiledTemplate,
    event: &Event,
    formatter: &Formatter,
) -> Result<Vec<Value>, LcfError> {
    compiled
        .handlers
        .iter()
        .zip(&compiled.slots)
        .map(|(handler, attribute)| {
            handler(event, formatter).map_err(|source| LcfError::Handler {
                attribute: attribute.clone(),
                source,
            })
        })
        .collect()
}

/// Render one event into a complete line.
///
/// Either the whole line is returned or an error; no partial output.
pub fn render(
    compiled: &CompiledTemplate,
    event: &Event,
    formatter: &Formatter,
) -> Result<String, LcfError> {
    let args = resolve(compiled, event, formatter)?;
    Ok(sprintf::sprintf(&compiled.format, &args)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Stream;
    use crate::handlers::{CustomHandlers, handler};
    use crate::level::Level;
    use crate::template::compile;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn plain_formatter() -> Formatter {
        Formatter::with_probe("", &CustomHandlers::new(), &|_: Stream| false, Stream::Stderr)
    }

    #[test]
    fn test_render_in_slot_order() {
        let compiled = compile("%[levelName]s|%[message]s", &CustomHandlers::new());
        let event = Event::new(Level::Warn, "disk low");
        let line = render(&compiled, &event, &plain_formatter()).unwrap();
        assert_eq!(line, "WARNING|disk low");
    }

    #[test]
    fn test_first_error_stops_rendering() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut custom = CustomHandlers::new();
        custom.insert("boom".to_string(), handler(|_, _| Err("exploded".into())));
        custom.insert(
            "count".to_string(),
            handler(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(1))
            }),
        );

        let compiled = compile("%[count]d %[boom]s %[count]d", &custom);
        let event = Event::new(Level::Info, "x");
        let err = render(&compiled, &event, &plain_formatter()).unwrap_err();

        match err {
            LcfError::Handler { attribute, source } => {
                assert_eq!(attribute, "boom");
                assert_eq!(source.to_string(), "exploded");
            }
            other => panic!("expected handler error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_attribute_resolved_per_occurrence() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut custom = CustomHandlers::new();
        custom.insert(
            "tick".to_string(),
            handler(move |_, _| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Uint(n as u64))
            }),
        );
        let compiled = compile("%[tick]d-%[tick]d", &custom);
        let line = render(&compiled, &Event::new(Level::Info, "x"), &plain_formatter()).unwrap();
        assert_eq!(line, "0-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_verb_mismatch_surfaces_as_format_error() {
        let compiled = compile("%[message]d", &CustomHandlers::new());
        let err = render(&compiled, &Event::new(Level::Info, "x"), &plain_formatter()).unwrap_err();
        assert!(matches!(err, LcfError::Format(_)), "got {err:?}");
    }

    #[test]
    fn test_unknown_placeholder_renders_literally() {
        let compiled = compile("%[unknownAttr]s", &CustomHandlers::new());
        assert!(compiled.handlers.is_empty());
        let line = render(&compiled, &Event::new(Level::Info, "x"), &plain_formatter()).unwrap();
        assert_eq!(line, "%[unknownAttr]s");
    }

    #[test]
    fn test_numeric_placeholder_renders_literally() {
        let event = Event::new(Level::Info, "hello");

        let compiled = compile("%[2]s", &CustomHandlers::new());
        let line = render(&compiled, &event, &plain_formatter()).unwrap();
        assert_eq!(line, "%[2]s");

        let compiled = compile("%[message]s %[1]s", &CustomHandlers::new());
        let line = render(&compiled, &event, &plain_formatter()).unwrap();
        assert_eq!(line, "hello %[1]s");
    }
}
