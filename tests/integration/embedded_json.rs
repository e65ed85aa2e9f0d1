//! Lines with a plain-text prefix before a JSON object.

use crate::lcf;

#[test]
fn prefix_is_kept_before_rendered_record() {
    let input = r#"2026-02-06 00:15:13.449 {"level":"debug","msg":"health check"}"#;
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("2026-02-06 00:15:13.449 DEBUG::health check\n");
}

#[test]
fn invalid_embedded_json_passes_through() {
    let input = "prefix text {not valid json}";
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("prefix text {not valid json}\n");
}

#[test]
fn embedded_record_respects_level_filter() {
    let input = concat!(
        r#"app | {"level":"debug","msg":"hidden"}"#,
        "\n",
        r#"app | {"level":"error","msg":"shown"}"#,
        "\n",
    );
    lcf()
        .args(["--color=never", "--level=info"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("app | ERROR::shown\n");
}
