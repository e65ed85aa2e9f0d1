//! Custom keys and the TOML config file.

use std::io::Write;

use predicates::prelude::*;

use crate::lcf;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn custom_message_key() {
    let input = r#"{"level":"info","event":"something happened","port":8080}"#;
    lcf()
        .args(["--color=never", "--message-key=event"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO::something happened port=8080\n");
}

#[test]
fn custom_level_key() {
    let input = r#"{"severity":"warn","lvl":"debug","msg":"disk low"}"#;
    lcf()
        .args(["--color=never", "--level-key=lvl"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("DEBUG::disk low severity=warn\n");
}

#[test]
fn custom_timestamp_key() {
    let input = r#"{"level":"info","msg":"tick","at":"2026-01-15T10:30:00Z"}"#;
    lcf()
        .args(["--color=never", "--utc", "--timestamp-key=at"])
        .args(["--template", r"%[ascTime]s %[message]s\n"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("2026-01-15 10:30:00.000 tick\n");
}

#[test]
fn config_file_keys_and_aliases() {
    let file = config_file(
        r#"
color = "never"

[keys]
message = "event"
name = "component"

[levels]
"verbose" = "debug"
"#,
    );
    let input = r#"{"level":"verbose","event":"cache warm","component":"cache"}"#;
    lcf()
        .arg("--config")
        .arg(file.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout("DEBUG:cache:cache warm\n");
}

#[test]
fn config_file_colors() {
    let file = config_file(
        r#"
color = "always"
template = "%[shortLevelName]s %[message]s\n"

[colors]
info = "green"
warn = 0
"#,
    );
    let input = concat!(
        r#"{"level":"info","msg":"a"}"#,
        "\n",
        r#"{"level":"warn","msg":"b"}"#,
        "\n",
    );
    lcf()
        .arg("--config")
        .arg(file.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout("\x1b[32mINFO\x1b[0m a\nWARN b\n");
}

#[test]
fn cli_overrides_config_file() {
    let file = config_file("color = \"always\"\npreset = \"detailed\"\n");
    lcf()
        .arg("--config")
        .arg(file.path())
        .args(["--color=never", "--preset=message"])
        .write_stdin(r#"{"level":"info","msg":"hello","k":1}"#)
        .assert()
        .success()
        .stdout("hello k=1\n");
}

#[test]
fn missing_config_file_exits_one() {
    lcf()
        .args(["--config", "/nonexistent/lcf/config.toml"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lcf:"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn invalid_config_file_exits_one() {
    let file = config_file("color = [not toml");
    lcf()
        .arg("--config")
        .arg(file.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file error"));
}

#[test]
fn unknown_color_name_exits_one() {
    let file = config_file("[colors]\ninfo = \"chartreuse\"\n");
    lcf()
        .arg("--config")
        .arg(file.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("chartreuse"));
}
