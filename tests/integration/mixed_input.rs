//! Interleaved JSON and plain-text input.

use crate::lcf;

#[test]
fn plain_lines_pass_through_in_order() {
    let input = concat!(
        "starting up\n",
        r#"{"level":"info","msg":"listening","port":80}"#,
        "\n",
        "[1, 2, 3]\n",
        r#"{"level":"error","msg":"crashed"}"#,
        "\n",
        "goodbye\n",
    );
    lcf()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("starting up\nINFO::listening port=80\n[1, 2, 3]\nERROR::crashed\ngoodbye\n");
}

#[test]
fn blank_lines_preserved() {
    lcf()
        .arg("--color=never")
        .write_stdin("a\n\nb\n")
        .assert()
        .success()
        .stdout("a\n\nb\n");
}

#[test]
fn plain_lines_never_colored() {
    let output = lcf()
        .arg("--color=always")
        .write_stdin("just text\n")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "just text\n");
}
