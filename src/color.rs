//! ANSI colorization keyed on event severity.
//!
//! The decision to colorize is made per call, first match wins:
//! 1. `force_colors` on the formatter
//! 2. `disable_colors` on the formatter
//! 3. whether the destination stream was probed as ANSI-capable at construction
//!
//! The wrapped text is `ESC[<code>m` + text + `ESC[0m`. Padding applied later by
//! the positional formatter counts visible characters only, so wrapping before
//! padding keeps columns aligned.

use std::ffi::OsString;
use std::io::{self, IsTerminal};

use crate::event::Event;
use crate::formatter::Formatter;
use crate::level::Level;

/// "No color" sentinel. A level mapped to this code is never wrapped.
pub const ANSI_RESET: u8 = 0;
pub const RED: u8 = 31;
pub const GREEN: u8 = 32;
pub const YELLOW: u8 = 33;
pub const BLUE: u8 = 34;
pub const MAGENTA: u8 = 35;
pub const CYAN: u8 = 36;
pub const GRAY: u8 = 37;

/// Per-level ANSI foreground codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable {
    pub trace: u8,
    pub debug: u8,
    pub info: u8,
    pub warn: u8,
    pub error: u8,
    pub fatal: u8,
    pub panic: u8,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            trace: BLUE,
            debug: GRAY,
            info: BLUE,
            warn: YELLOW,
            error: RED,
            fatal: RED,
            panic: RED,
        }
    }
}

impl ColorTable {
    /// Code configured for `level`.
    pub const fn code(&self, level: Level) -> u8 {
        match level {
            Level::Trace => self.trace,
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Fatal => self.fatal,
            Level::Panic => self.panic,
        }
    }

    /// Override the code for one level.
    pub fn set(&mut self, level: Level, code: u8) {
        let slot = match level {
            Level::Trace => &mut self.trace,
            Level::Debug => &mut self.debug,
            Level::Info => &mut self.info,
            Level::Warn => &mut self.warn,
            Level::Error => &mut self.error,
            Level::Fatal => &mut self.fatal,
            Level::Panic => &mut self.panic,
        };
        *slot = code;
    }
}

/// Convert a color name or a numeric code string into an ANSI code.
///
/// Accepts the eight standard names, their `bright_` variants, `none`/`reset`
/// for [`ANSI_RESET`], or a decimal code. Returns `None` for anything else.
pub fn parse_color(color: &str) -> Option<u8> {
    let lower = color.trim().to_lowercase();
    if let Ok(code) = lower.parse::<u8>() {
        return Some(code);
    }
    let code = match lower.as_str() {
        "none" | "reset" | "default" => ANSI_RESET,
        "black" => 30,
        "red" => RED,
        "green" => GREEN,
        "yellow" => YELLOW,
        "blue" => BLUE,
        "magenta" | "purple" => MAGENTA,
        "cyan" => CYAN,
        "white" | "gray" | "grey" => GRAY,
        "bright_black" => 90,
        "bright_red" => 91,
        "bright_green" => 92,
        "bright_yellow" => 93,
        "bright_blue" => 94,
        "bright_magenta" => 95,
        "bright_cyan" => 96,
        "bright_white" => 97,
        _ => return None,
    };
    Some(code)
}

/// Whether colors should be emitted given the formatter switches and the
/// probed terminal capability. Force wins over disable.
pub const fn colors_enabled(force: bool, disable: bool, terminal: bool) -> bool {
    if force {
        true
    } else if disable {
        false
    } else {
        terminal
    }
}

/// Wrap `text` in the ANSI color configured for the event's level.
///
/// Returns `text` unchanged when colors are off or the level is mapped to
/// [`ANSI_RESET`].
pub fn colorize(event: &Event, formatter: &Formatter, text: &str) -> String {
    if !colors_enabled(
        formatter.force_colors,
        formatter.disable_colors,
        formatter.terminal_colors(),
    ) {
        return text.to_string();
    }
    wrap(formatter.colors.code(event.level), text)
}

/// Wrap `text` in `code`, or return it unchanged for [`ANSI_RESET`].
pub fn wrap(code: u8, text: &str) -> String {
    if code == ANSI_RESET {
        return text.to_string();
    }
    format!("\x1b[{code}m{text}\x1b[0m")
}

/// Output stream whose terminal capability is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    Stdout,
    #[default]
    Stderr,
}

/// Query answering "will ANSI escapes render on this stream?".
///
/// Closures `Fn(Stream) -> bool` implement it, which keeps tests away from
/// the real terminal.
pub trait TerminalProbe {
    fn supports_ansi(&self, stream: Stream) -> bool;
}

impl<F> TerminalProbe for F
where
    F: Fn(Stream) -> bool,
{
    fn supports_ansi(&self, stream: Stream) -> bool {
        self(stream)
    }
}

/// Probe backed by the process's real standard streams and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl TerminalProbe for SystemProbe {
    fn supports_ansi(&self, stream: Stream) -> bool {
        let is_tty = match stream {
            Stream::Stdout => io::stdout().is_terminal(),
            Stream::Stderr => io::stderr().is_terminal(),
        };
        ansi_capable(is_tty, cfg!(windows), |key| std::env::var_os(key))
    }
}

/// Decide ANSI capability from a TTY flag and environment markers.
///
/// `legacy_console` marks a platform whose console does not interpret ANSI
/// natively; there a translation layer (ConEmu, ANSICON, Windows Terminal)
/// must announce itself through the environment.
pub fn ansi_capable(
    is_tty: bool,
    legacy_console: bool,
    env: impl Fn(&str) -> Option<OsString>,
) -> bool {
    if !is_tty {
        return false;
    }
    if env("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if env("TERM").is_some_and(|v| v == "dumb") {
        return false;
    }
    if !legacy_console {
        return true;
    }
    env("ConEmuANSI").is_some_and(|v| v == "ON")
        || env("ANSICON").is_some_and(|v| !v.is_empty())
        || env("WT_SESSION").is_some_and(|v| !v.is_empty())
}
