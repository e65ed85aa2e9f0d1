//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/lcf/config.toml` or `$XDG_CONFIG_HOME/lcf/config.toml`)
//! 3. Built-in defaults

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;
use serde::Deserialize;

use crate::cli::{Cli, ColorMode, Preset};
use crate::color::{self, ColorTable, Stream, SystemProbe};
use crate::error::LcfError;
use crate::formatter::Formatter;
use crate::handlers::CustomHandlers;
use crate::level::Level;
use crate::template;
use crate::timestamp::DEFAULT_FORMAT;

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Minimum log level to display; lines below this are suppressed.
    pub min_level: Option<Level>,
    /// Template every record is rendered through.
    pub template: String,
    /// Custom JSON key for the message field (overrides alias table).
    pub message_key: Option<String>,
    /// Custom JSON key for the level field (overrides alias table).
    pub level_key: Option<String>,
    /// Custom JSON key for the timestamp field (overrides alias table).
    pub timestamp_key: Option<String>,
    /// Custom JSON key for the logger name (overrides alias table).
    pub name_key: Option<String>,
    /// Timestamp display format string (strftime-compatible).
    pub timestamp_format: String,
    pub short_timestamp: bool,
    pub disable_sorting: bool,
    /// Format timestamps in UTC instead of the system time zone.
    pub utc: bool,
    /// Custom level name aliases mapping string → [`Level`].
    pub level_aliases: Option<HashMap<String, Level>>,
    pub colors: ColorTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            min_level: None,
            template: template::BASIC.to_string(),
            message_key: None,
            level_key: None,
            timestamp_key: None,
            name_key: None,
            timestamp_format: DEFAULT_FORMAT.to_string(),
            short_timestamp: false,
            disable_sorting: false,
            utc: false,
            level_aliases: None,
            colors: ColorTable::default(),
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults. An explicit
    /// `--config` path that does not exist is an error; a missing default
    /// file is not.
    pub fn from_cli(cli: &Cli) -> Result<Self, LcfError> {
        let mut config = Self::default();

        match &cli.config {
            Some(path) if !path.exists() => {
                return Err(LcfError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            Some(path) => config.apply_file_config(FileConfig::load(path)?)?,
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    config.apply_file_config(FileConfig::load(&path)?)?;
                }
            }
        }

        // CLI overrides
        if let Some(color) = cli.color {
            config.color_mode = color;
        }

        if let Some(ref level_str) = cli.level {
            config.min_level = Level::from_str_loose(level_str);
        }

        if let Some(ref template) = cli.template {
            config.template = unescape(template);
        } else if let Some(preset) = cli.preset {
            config.template = preset.template().to_string();
        }

        if let Some(ref format) = cli.timestamp_format {
            config.timestamp_format.clone_from(format);
        }
        config.short_timestamp |= cli.short_timestamp;
        config.disable_sorting |= cli.disable_sorting;
        config.utc |= cli.utc;

        if cli.message_key.is_some() {
            config.message_key.clone_from(&cli.message_key);
        }
        if cli.level_key.is_some() {
            config.level_key.clone_from(&cli.level_key);
        }
        if cli.timestamp_key.is_some() {
            config.timestamp_key.clone_from(&cli.timestamp_key);
        }

        Ok(config)
    }

    /// Build the [`Formatter`] for stdout described by this configuration.
    pub fn formatter(&self) -> Formatter {
        let mut formatter = Formatter::with_probe(
            &self.template,
            &CustomHandlers::new(),
            &SystemProbe,
            Stream::Stdout,
        );
        (formatter.force_colors, formatter.disable_colors) = self.color_mode.switches();
        formatter.disable_sorting = self.disable_sorting;
        formatter.short_timestamp = self.short_timestamp;
        formatter.timestamp_format.clone_from(&self.timestamp_format);
        formatter.colors = self.colors;
        if self.utc {
            formatter.time_zone = TimeZone::UTC;
        }
        formatter
    }

    /// Default config file path: `$XDG_CONFIG_HOME/lcf/config.toml` or `~/.config/lcf/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("lcf").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("lcf")
                .join("config.toml")
        } else {
            PathBuf::from(".config/lcf/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), LcfError> {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => ColorMode::Auto,
            };
        }

        if let Some(level) = file.level {
            self.min_level = Level::from_str_loose(&level);
        }

        if let Some(template) = file.template {
            self.template = template;
        } else if let Some(preset) = file.preset {
            self.template = parse_preset(&preset)?.template().to_string();
        }

        if let Some(format) = file.timestamp_format {
            self.timestamp_format = format;
        }
        if let Some(short) = file.short_timestamp {
            self.short_timestamp = short;
        }
        if let Some(disable) = file.disable_sorting {
            self.disable_sorting = disable;
        }
        if let Some(utc) = file.utc {
            self.utc = utc;
        }

        if let Some(keys) = file.keys {
            if let Some(msg) = keys.message {
                self.message_key = Some(msg);
            }
            if let Some(lvl) = keys.level {
                self.level_key = Some(lvl);
            }
            if let Some(ts) = keys.timestamp {
                self.timestamp_key = Some(ts);
            }
            if let Some(name) = keys.name {
                self.name_key = Some(name);
            }
        }

        if let Some(levels) = file.levels {
            let mut aliases = HashMap::new();
            for (key, value) in levels {
                if let Some(level) = Level::from_str_loose(&value) {
                    aliases.insert(key.to_lowercase(), level);
                }
            }
            if !aliases.is_empty() {
                self.level_aliases = Some(aliases);
            }
        }

        if let Some(colors) = file.colors {
            for (level_name, spec) in colors {
                let level = Level::from_str_loose(&level_name).ok_or_else(|| {
                    LcfError::Config(format!("unknown level {level_name:?} in [colors]"))
                })?;
                self.colors.set(level, spec.code()?);
            }
        }

        Ok(())
    }
}

fn parse_preset(name: &str) -> Result<Preset, LcfError> {
    match name.to_lowercase().as_str() {
        "basic" => Ok(Preset::Basic),
        "message" => Ok(Preset::Message),
        "detailed" => Ok(Preset::Detailed),
        _ => Err(LcfError::Config(format!(
            "unknown preset {name:?}: expected basic, message or detailed"
        ))),
    }
}

/// Expand the `\n` and `\t` escapes a shell leaves in a `--template` value.
fn unescape(template: &str) -> String {
    template.replace("\\n", "\n").replace("\\t", "\t")
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
struct FileConfig {
    color: Option<String>,
    level: Option<String>,
    template: Option<String>,
    preset: Option<String>,
    timestamp_format: Option<String>,
    short_timestamp: Option<bool>,
    disable_sorting: Option<bool>,
    utc: Option<bool>,
    keys: Option<KeysConfig>,
    levels: Option<HashMap<String, String>>,
    colors: Option<HashMap<String, ColorSpec>>,
}

#[derive(Debug, Deserialize)]
struct KeysConfig {
    message: Option<String>,
    level: Option<String>,
    timestamp: Option<String>,
    name: Option<String>,
}

/// A `[colors]` entry: either a raw ANSI code or a color name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Code(u8),
    Name(String),
}

impl ColorSpec {
    fn code(&self) -> Result<u8, LcfError> {
        match self {
            Self::Code(code) => Ok(*code),
            Self::Name(name) => color::parse_color(name)
                .ok_or_else(|| LcfError::Config(format!("unknown color {name:?} in [colors]"))),
        }
    }
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, LcfError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LcfError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
