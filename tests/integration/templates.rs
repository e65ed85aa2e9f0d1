//! Custom templates, presets and render failures.

use predicates::prelude::*;

use crate::lcf;

#[test]
fn template_with_width_and_relative_time() {
    let template = r"%[shortLevelName]s[%04[relativeCreated]d] %-12[message]s|%[fields]s\n";
    lcf()
        .args(["--color=never", "--template", template])
        .write_stdin(r#"{"level":"debug","msg":"hello","n":1}"#)
        .assert()
        .success()
        .stdout("DEBU[0000] hello       | n=1\n");
}

#[test]
fn template_without_newline_still_ends_lines() {
    lcf()
        .args(["--color=never", "--template", "%[levelName]s %[message]s"])
        .write_stdin("{\"level\":\"info\",\"msg\":\"a\"}\n{\"level\":\"info\",\"msg\":\"b\"}\n")
        .assert()
        .success()
        .stdout("INFO a\nINFO b\n");
}

#[test]
fn unknown_placeholder_is_literal() {
    lcf()
        .args(["--color=never", "--template", r"%[hostname]s %[message]s\n"])
        .write_stdin(r#"{"level":"info","msg":"hi"}"#)
        .assert()
        .success()
        .stdout("%[hostname]s hi\n");
}

#[test]
fn detailed_preset_in_utc() {
    let input = r#"{"time":"2026-01-15T10:30:00Z","level":"error","logger":"worker","msg":"failed"}"#;
    lcf()
        .args(["--color=never", "--utc", "--preset=detailed"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2026-01-15 10:30:00.000 "))
        .stdout(predicate::str::contains(" ERRO worker "))
        .stdout(predicate::str::ends_with("failed\n"));
}

#[test]
fn custom_timestamp_format() {
    let input = r#"{"time":"2026-01-15T10:30:00Z","level":"info","msg":"x"}"#;
    lcf()
        .args(["--color=never", "--utc", "--timestamp-format=%H:%M"])
        .args(["--template", r"%[ascTime]s %[message]s\n"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("10:30 x\n");
}

#[test]
fn short_timestamp_prints_elapsed_seconds() {
    lcf()
        .args(["--color=never", "--short-timestamp"])
        .args(["--template", r"[%04[ascTime]d] %[message]s\n"])
        .write_stdin(r#"{"level":"info","msg":"x"}"#)
        .assert()
        .success()
        .stdout("[0000] x\n");
}

#[test]
fn verb_mismatch_exits_two() {
    lcf()
        .args(["--color=never", "--template", r"%[message]d\n"])
        .write_stdin(r#"{"level":"info","msg":"not a number"}"#)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("lcf:"))
        .stderr(predicate::str::contains("format error"));
}

#[test]
fn bad_timestamp_format_exits_two() {
    lcf()
        .args(["--color=never", "--timestamp-format=%Y-%", "--preset=detailed"])
        .write_stdin(r#"{"level":"info","msg":"x"}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ascTime"));
}

#[test]
fn template_conflicts_with_preset() {
    lcf()
        .args(["--template", "%[message]s", "--preset", "basic"])
        .write_stdin("")
        .assert()
        .failure();
}
