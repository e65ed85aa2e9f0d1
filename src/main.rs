use std::fmt::Display;
use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use owo_colors::{OwoColorize, Stream};

use lcf::cli::Cli;
use lcf::config::Config;
use lcf::parser::{LineKind, parse_line};

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when lcf exits early.
    reset_sigpipe();

    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            return ExitCode::from(1);
        }
    };
    let formatter = config.formatter();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut line_buf = String::new();

    for line_result in stdin.lock().lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => {
                report(format_args!("read error: {e}"));
                return ExitCode::from(2);
            }
        };

        line_buf.clear();
        let rendered = match parse_line(&line, &config) {
            LineKind::Raw => {
                line_buf.push_str(&line);
                Ok(())
            }
            LineKind::Json(record) if record.is_suppressed(&config) => continue,
            LineKind::EmbeddedJson { record, .. } if record.is_suppressed(&config) => continue,
            LineKind::Json(record) => formatter.format_into(&record.event, &mut line_buf),
            LineKind::EmbeddedJson { prefix, record } => {
                line_buf.push_str(&prefix);
                formatter.format_into(&record.event, &mut line_buf)
            }
        };
        if let Err(e) = rendered {
            report(&e);
            return ExitCode::from(2);
        }

        if !line_buf.ends_with('\n') {
            line_buf.push('\n');
        }
        if let Err(e) = writer.write_all(line_buf.as_bytes()) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return ExitCode::SUCCESS;
            }
            report(format_args!("write error: {e}"));
            return ExitCode::from(2);
        }
    }

    if let Err(e) = writer.flush() {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return ExitCode::SUCCESS;
        }
        report(format_args!("flush error: {e}"));
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Print a diagnostic to stderr behind a red `lcf:` prefix.
fn report(message: impl Display) {
    eprintln!(
        "{} {message}",
        "lcf:".if_supports_color(Stream::Stderr, |t| t.red())
    );
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// For a filter like `lcf`, this causes the *upstream* writer to receive a
/// `BrokenPipeError` when `lcf` exits. Restoring `SIG_DFL` lets the OS handle
/// the signal normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
