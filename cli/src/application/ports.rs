//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::Result;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Commands are complete shell command lines. Execution is synchronous from
/// the caller's point of view: each call completes before the next begins.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a shell command, capturing stdout and stderr combined, in the
    /// order produced, into `Output::stdout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned or waited on.
    async fn run_shell(&self, command: &str) -> Result<Output>;

    /// Run a shell command with the terminal handed over (inherited stdio)
    /// and return its exit status once it finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned or waited on.
    async fn run_interactive(&self, command: &str) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts operator-facing reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit the status line printed before a step is attempted.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an error message.
    fn error(&self, message: &str);
    /// Echo one line of a failed command's output, verbatim.
    fn output_line(&self, line: &str);
    /// The next command takes over the terminal; stop any live indicator
    /// and show `message` first.
    fn handover(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts local file writes performed by `commands` steps.
pub trait FileWriter {
    /// Create or truncate `path` and write `contents` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
}
