//! End-to-end tests driving the `lcf` binary over stdin/stdout.

mod basic_pipe;
mod color_control;
mod config_custom;
mod embedded_json;
mod level_filter;
mod mixed_input;
mod templates;

use assert_cmd::Command;

/// `lcf` with the user's config directory pointed somewhere empty.
#[allow(deprecated)]
pub fn lcf() -> Command {
    let mut cmd = Command::cargo_bin("lcf").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/lcf-test-no-config");
    cmd.env_remove("NO_COLOR");
    cmd
}
