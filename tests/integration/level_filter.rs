//! Minimum level filtering with `--level`.

use predicates::prelude::*;

use crate::lcf;

const INPUT: &str = concat!(
    r#"{"level":"trace","msg":"t"}"#,
    "\n",
    r#"{"level":"info","msg":"i"}"#,
    "\n",
    r#"{"level":"warn","msg":"w"}"#,
    "\n",
    r#"{"level":60,"msg":"f"}"#,
    "\n",
    r#"{"msg":"no level"}"#,
    "\n",
);

#[test]
fn warn_and_above_shown() {
    lcf()
        .args(["--color=never", "--level=warn", "--preset=message"])
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout("w\nf\nno level\n");
}

#[test]
fn level_is_case_insensitive() {
    lcf()
        .args(["--color=never", "--level=FATAL", "--preset=message"])
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout("f\nno level\n");
}

#[test]
fn invalid_level_rejected() {
    lcf()
        .arg("--level=verbose")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid level"));
}
