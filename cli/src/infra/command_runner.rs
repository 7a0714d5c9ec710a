//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `ShellCommandRunner` is the production implementation: every command is a
//! `sh -c` command line run through tokio, one at a time, with no timeout.

use std::process::{ExitStatus, Output, Stdio};

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Default shell used to interpret command lines.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Production `CommandRunner`: runs command lines through a POSIX shell.
///
/// Captured commands get `exec 2>&1` prepended so stderr lands in the same
/// pipe as stdout and lines keep the order in which they were produced.
/// Interactive commands keep the terminal on stdin and stderr but have their
/// stdout sent to stderr, so stdout only ever carries this tool's own output.
/// A command that hangs blocks the caller indefinitely.
pub struct ShellCommandRunner {
    shell: String,
}

impl ShellCommandRunner {
    #[must_use]
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

/// Shell script for a captured command: stderr joins stdout.
fn captured_script(command: &str) -> String {
    format!("exec 2>&1\n{command}")
}

/// Shell script for an interactive command: stdout joins stderr.
fn interactive_script(command: &str) -> String {
    format!("exec 1>&2\n{command}")
}

impl CommandRunner for ShellCommandRunner {
    async fn run_shell(&self, command: &str) -> Result<Output> {
        tokio::process::Command::new(&self.shell)
            .arg("-c")
            .arg(captured_script(command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to run {} -c", self.shell))
    }

    async fn run_interactive(&self, command: &str) -> Result<ExitStatus> {
        let mut child = tokio::process::Command::new(&self.shell)
            .arg("-c")
            .arg(interactive_script(command))
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.shell))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {command}"))
    }
}
