//! Basic stdin->stdout piping with the default template.

use predicates::prelude::*;

use crate::lcf;

#[test]
fn empty_stdin_exits_zero() {
    lcf().write_stdin("").assert().success().stdout("");
}

#[test]
fn single_json_line_uses_basic_template() {
    let input = r#"{"level":"info","msg":"hello","port":8080}"#;
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO::hello port=8080\n");
}

#[test]
fn logger_field_fills_name() {
    let input = r#"{"level":"warn","logger":"db","msg":"slow query","ms":812}"#;
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("WARNING:db:slow query ms=812\n");
}

#[test]
fn extra_fields_sorted_alphabetically() {
    let input = r#"{"level":"info","msg":"test","zebra":"z","alpha":"a","middle":"m"}"#;
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO::test alpha=a middle=m zebra=z\n");
}

#[test]
fn disable_sorting_keeps_every_field() {
    let input = r#"{"level":"info","msg":"test","zebra":"z","alpha":"a"}"#;
    lcf()
        .args(["--color=never", "--disable-sorting"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(" alpha=a"))
        .stdout(predicate::str::contains(" zebra=z"));
}

#[test]
fn dot_notation_flattening() {
    let input = r#"{"level":"info","msg":"req","http":{"method":"GET","status":200}}"#;
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO::req http.method=GET http.status=200\n");
}

#[test]
fn multiple_lines_keep_order() {
    let input = concat!(
        r#"{"level":"debug","msg":"one"}"#,
        "\n",
        r#"{"level":"error","msg":"two"}"#,
        "\n",
        r#"{"level":"panic","msg":"three"}"#,
        "\n",
    );
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("DEBUG::one\nERROR::two\nPANIC::three\n");
}
