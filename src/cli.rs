//! Command-line argument definitions for `lcf`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use clap::{Parser, ValueEnum};

use crate::template;

/// Format JSON log lines from stdin through a template.
///
/// Reads JSON log lines from stdin and writes one rendered line per record
/// to stdout. Non-JSON lines are passed through unchanged.
#[derive(Debug, Parser)]
#[command(name = "lcf", version, about, long_about = None)]
pub struct Cli {
    /// Template with `%[attribute]verb` placeholders.
    ///
    /// Takes precedence over `--preset`. Escapes `\n` and `\t` are expanded.
    #[arg(short = 'T', long, conflicts_with = "preset")]
    pub template: Option<String>,

    /// Built-in template to use when no `--template` is given.
    #[arg(short = 'p', long, value_enum)]
    pub preset: Option<Preset>,

    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a terminal.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// Minimum severity level to display.
    ///
    /// Lines below this level are suppressed. Non-JSON lines always pass through.
    #[arg(short = 'l', long, value_parser = parse_level_arg)]
    pub level: Option<String>,

    /// strftime format for `ascTime`.
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Print seconds since start instead of the event time in `ascTime`.
    #[arg(short = 's', long)]
    pub short_timestamp: bool,

    /// Print extra fields in unspecified order instead of sorted by key.
    #[arg(long)]
    pub disable_sorting: bool,

    /// Format timestamps in UTC instead of the local time zone.
    #[arg(short = 'u', long)]
    pub utc: bool,

    /// Override the JSON key used for the log message field.
    #[arg(short = 'm', long)]
    pub message_key: Option<String>,

    /// Override the JSON key used for the log level field.
    #[arg(long)]
    pub level_key: Option<String>,

    /// Override the JSON key used for the timestamp field.
    #[arg(short = 't', long)]
    pub timestamp_key: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a terminal.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

impl ColorMode {
    /// `(force_colors, disable_colors)` switches for a formatter.
    pub const fn switches(self) -> (bool, bool) {
        match self {
            Self::Auto => (false, false),
            Self::Always => (true, false),
            Self::Never => (false, true),
        }
    }
}

/// Built-in template presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// `LEVEL:name:message fields`
    Basic,
    /// Message and fields only.
    Message,
    /// Timestamp, PID, short level, name, message and fields.
    Detailed,
}

impl Preset {
    pub const fn template(self) -> &'static str {
        match self {
            Self::Basic => template::BASIC,
            Self::Message => template::MESSAGE,
            Self::Detailed => template::DETAILED,
        }
    }
}

/// Parse level argument as case-insensitive string.
fn parse_level_arg(s: &str) -> Result<String, String> {
    let lower = s.to_lowercase();
    match lower.as_str() {
        "trace" | "debug" | "info" | "warn" | "warning" | "error" | "fatal" | "panic" => Ok(lower),
        _ => Err(format!(
            "invalid level '{s}': expected one of trace, debug, info, warn, error, fatal, panic"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_arg_valid() {
        assert_eq!(parse_level_arg("info").unwrap(), "info");
        assert_eq!(parse_level_arg("INFO").unwrap(), "info");
        assert_eq!(parse_level_arg("Warning").unwrap(), "warning");
        assert_eq!(parse_level_arg("PANIC").unwrap(), "panic");
    }

    #[test]
    fn test_parse_level_arg_invalid() {
        let err = parse_level_arg("verbose").unwrap_err();
        assert!(err.contains("invalid level"));
        let err = parse_level_arg("").unwrap_err();
        assert!(err.contains("invalid level"));
    }

    #[test]
    fn test_color_mode_switches() {
        assert_eq!(ColorMode::Auto.switches(), (false, false));
        assert_eq!(ColorMode::Always.switches(), (true, false));
        assert_eq!(ColorMode::Never.switches(), (false, true));
    }

    #[test]
    fn test_preset_templates() {
        assert_eq!(Preset::Basic.template(), template::BASIC);
        assert_eq!(Preset::Message.template(), template::MESSAGE);
        assert_eq!(Preset::Detailed.template(), template::DETAILED);
    }

    #[test]
    fn test_template_conflicts_with_preset() {
        let result = Cli::try_parse_from(["lcf", "--template", "%[message]s", "--preset", "basic"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from(["lcf", "-p", "detailed", "-c", "never", "-u", "--disable-sorting"])
            .unwrap();
        assert_eq!(cli.preset, Some(Preset::Detailed));
        assert_eq!(cli.color, Some(ColorMode::Never));
        assert!(cli.utc);
        assert!(cli.disable_sorting);
        assert!(!cli.short_timestamp);
    }
}
