//! Subprocess logging for verbose output.

use std::process::Command;
use tracing::debug;

/// Log a command just before it is spawned.
///
/// Emits a `tracing::debug!` event with the program name, arguments and
/// working directory. Visible with `-vv` or `RUST_LOG=git_ssb::cmd=debug`.
pub fn log_cmd(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cwd = cmd
        .get_current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    debug!(
        target: "git_ssb::cmd",
        %program,
        ?args,
        %cwd,
        "exec"
    );
}
