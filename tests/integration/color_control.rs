//! Color control: `--color` flag, piped stdout and `NO_COLOR`.

use crate::lcf;

fn stdout_of(args: &[&str], input: &str) -> String {
    let output = lcf().args(args).write_stdin(input).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn color_never_disables_ansi() {
    let stdout = stdout_of(&["--color=never"], r#"{"level":"info","msg":"hello"}"#);
    assert!(!stdout.contains("\x1b["), "unexpected escapes in {stdout:?}");
}

#[test]
fn color_always_colors_level_and_keys() {
    let stdout = stdout_of(&["--color=always"], r#"{"level":"error","msg":"boom","code":7}"#);
    assert_eq!(stdout, "\x1b[31mERROR\x1b[0m::boom \x1b[31mcode\x1b[0m=7\n");
}

#[test]
fn auto_mode_with_piped_stdout_is_plain() {
    let stdout = stdout_of(&[], r#"{"level":"info","msg":"hello"}"#);
    assert_eq!(stdout, "INFO::hello\n");
}

#[test]
fn color_always_wins_over_no_color() {
    let output = lcf()
        .arg("--color=always")
        .env("NO_COLOR", "1")
        .write_stdin(r#"{"level":"info","msg":"hello"}"#)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("\x1b[34mINFO\x1b[0m"), "got {stdout:?}");
}

#[test]
fn padding_counts_visible_characters() {
    let args = ["--color=always", "--template", r"%-8[levelName]s|%[message]s\n"];
    let stdout = stdout_of(&args, r#"{"level":"warn","msg":"x"}"#);
    assert_eq!(stdout, "\x1b[33mWARNING\x1b[0m |x\n");
}
