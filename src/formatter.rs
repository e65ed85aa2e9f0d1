//! The formatter hosts call once per log record.
//!
//! A [`Formatter`] compiles its template once at construction, records the
//! start instant used by `relativeCreated`, and probes the destination stream
//! for ANSI support. Rendering only reads the formatter, so one instance can
//! be shared across threads behind an `Arc`. The public switches
//! (`force_colors`, `timestamp_format`, ...) need `&mut self`, which keeps
//! reconfiguration from racing with renders.

use std::time::Instant;

use jiff::tz::TimeZone;

use crate::color::{ColorTable, Stream, SystemProbe, TerminalProbe};
use crate::error::LcfError;
use crate::event::{Event, Fields, NAME_FIELD};
use crate::handlers::CustomHandlers;
use crate::render;
use crate::template::{self, Attributes, CompiledTemplate};
use crate::timestamp::DEFAULT_FORMAT;

/// Capability a host logging framework calls for every emitted record.
pub trait Format {
    /// Produce the final bytes for `event`, or fail without output.
    fn format(&self, event: &Event) -> Result<Vec<u8>, LcfError>;
}

/// Template-driven log line formatter.
///
/// Placeholders take the verbs `v s q d x X o b f F e E g G t` (see
/// [`crate::sprintf`]); any other verb fails the render with
/// `UnsupportedVerb`.
#[derive(Debug, Clone)]
pub struct Formatter {
    /// Colorize even when the destination is not a terminal. Wins over
    /// [`disable_colors`](Self::disable_colors).
    pub force_colors: bool,
    pub disable_colors: bool,
    /// Print `fields` in key enumeration order instead of sorted.
    pub disable_sorting: bool,
    /// Make `ascTime` print whole seconds since start instead of a timestamp.
    pub short_timestamp: bool,
    /// strftime-compatible format used by `ascTime`.
    pub timestamp_format: String,
    pub time_zone: TimeZone,
    pub colors: ColorTable,
    compiled: CompiledTemplate,
    start: Instant,
    terminal_colors: bool,
}

impl Formatter {
    /// Formatter using only built-in attributes, probing stderr.
    pub fn new(template: &str) -> Self {
        Self::with_handlers(template, &CustomHandlers::new())
    }

    /// Formatter with caller-supplied handlers, probing stderr.
    pub fn with_handlers(template: &str, custom: &CustomHandlers) -> Self {
        Self::with_probe(template, custom, &SystemProbe, Stream::Stderr)
    }

    /// Formatter whose terminal capability for `stream` is answered by `probe`.
    pub fn with_probe(
        template: &str,
        custom: &CustomHandlers,
        probe: &impl TerminalProbe,
        stream: Stream,
    ) -> Self {
        Self {
            force_colors: false,
            disable_colors: false,
            disable_sorting: false,
            short_timestamp: false,
            timestamp_format: DEFAULT_FORMAT.to_string(),
            time_zone: TimeZone::system(),
            colors: ColorTable::default(),
            compiled: template::compile(template, custom),
            start: Instant::now(),
            terminal_colors: probe.supports_ansi(stream),
        }
    }

    /// The template as written by the caller.
    pub fn template(&self) -> &str {
        &self.compiled.source
    }

    pub fn compiled(&self) -> &CompiledTemplate {
        &self.compiled
    }

    /// Attribute names the template uses.
    pub fn attributes(&self) -> &Attributes {
        &self.compiled.attributes
    }

    /// Whether the destination stream was probed as ANSI-capable.
    pub const fn terminal_colors(&self) -> bool {
        self.terminal_colors
    }

    /// Whole seconds since this formatter was created.
    pub fn elapsed_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }

    /// Replace the template, keeping every other setting.
    pub fn set_template(&mut self, template: &str, custom: &CustomHandlers) {
        self.compiled = template::compile(template, custom);
    }

    /// Fields a host should attach to events so `%[name]s` has a value.
    ///
    /// Empty when the template does not use `name`.
    pub fn builtin_fields(&self, name: &str) -> Fields {
        let mut fields = Fields::new();
        if self.attributes().contains(NAME_FIELD) {
            fields.insert(NAME_FIELD.to_string(), name.into());
        }
        fields
    }

    /// Render `event` into a line.
    pub fn render(&self, event: &Event) -> Result<String, LcfError> {
        render::render(&self.compiled, event, self)
    }

    /// Render `event` and append it to `out`. On error `out` is left unchanged.
    pub fn format_into(&self, event: &Event, out: &mut String) -> Result<(), LcfError> {
        out.push_str(&self.render(event)?);
        Ok(())
    }
}

impl Format for Formatter {
    fn format(&self, event: &Event) -> Result<Vec<u8>, LcfError> {
        self.render(event).map(String::into_bytes)
    }
}
