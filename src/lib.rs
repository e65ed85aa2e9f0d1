//! `lcf` — template-driven log line formatting.
//!
//! A [`Formatter`] is built from a template in which `%[name]verb`
//! placeholders name attributes of the log event. The template is compiled
//! once into a positional format string plus an ordered list of handlers;
//! each render calls the handlers and substitutes their values. Level names,
//! short level names and field keys are colored per level when the
//! destination is a terminal or colors are forced.
//!
//! # Example
//!
//! ```
//! use lcf::{Event, Formatter, Level};
//!
//! let mut formatter = Formatter::new("%[shortLevelName]s %-10[message]s|%[fields]s\n");
//! formatter.disable_colors = true;
//!
//! let event = Event::new(Level::Warn, "disk low").with_field("free", "2G");
//! let line = formatter.render(&event).unwrap();
//! assert_eq!(line, "WARN disk low  | free=2G\n");
//! ```

pub mod caller;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod fields;
pub mod formatter;
pub mod handlers;
pub mod level;
pub mod parser;
pub mod render;
pub mod sprintf;
pub mod template;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use color::{ColorTable, Stream, TerminalProbe};
pub use config::Config;
pub use error::LcfError;
pub use event::{Event, Fields, Value};
pub use formatter::{Format, Formatter};
pub use handlers::{CustomHandlers, Handler, HandlerError, handler};
pub use level::Level;
pub use sprintf::FormatError;
pub use template::{BASIC, CompiledTemplate, DETAILED, MESSAGE, compile};
pub use timestamp::Timestamp;
