//! `StepRunner`: executes one command at a time and reports uniformly.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! The runner never exits the process; fatal decisions are returned to the
//! caller as values.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::{CommandInvocation, ServiceState};

/// Exit status recorded when a command could not be spawned at all.
pub const SPAWN_FAILURE_STATUS: i32 = 127;

/// Exit status recorded when a child was terminated without an exit code.
pub const SIGNALLED_STATUS: i32 = -1;

/// Runs shell commands through a `CommandRunner` and echoes diagnostics
/// through a `ProgressReporter`.
pub struct StepRunner<'a, C, R> {
    runner: &'a C,
    reporter: &'a R,
    service_manager: &'a str,
}

impl<'a, C: CommandRunner, R: ProgressReporter> StepRunner<'a, C, R> {
    /// `service_manager` is the command prefix for service verbs, e.g.
    /// `sudo systemctl`.
    #[must_use]
    pub fn new(runner: &'a C, reporter: &'a R, service_manager: &'a str) -> Self {
        Self {
            runner,
            reporter,
            service_manager,
        }
    }

    #[must_use]
    pub fn reporter(&self) -> &'a R {
        self.reporter
    }

    /// Run `command` and capture its combined output.
    ///
    /// When the exit status is non-zero every captured line is echoed once,
    /// in order, through `ProgressReporter::output_line`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command could not be spawned.
    pub async fn run(&self, command: &str) -> Result<CommandInvocation> {
        tracing::debug!(command, "running");
        let output = self.runner.run_shell(command).await?;
        let exit_status = output.status.code().unwrap_or(SIGNALLED_STATUS);

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);
        let invocation = CommandInvocation::from_raw(command, &combined, exit_status);

        if !invocation.succeeded() {
            tracing::debug!(command, exit_status, "command failed");
            for line in &invocation.output_lines {
                self.reporter.output_line(line);
            }
        }
        Ok(invocation)
    }

    /// Run `command` and return its exit status. A spawn failure is echoed
    /// and reported as `SPAWN_FAILURE_STATUS`.
    pub async fn run_status(&self, command: &str) -> i32 {
        match self.run(command).await {
            Ok(invocation) => invocation.exit_status,
            Err(e) => {
                tracing::warn!(command, error = %e, "spawn failed");
                self.reporter.output_line(&format!("{e:#}"));
                SPAWN_FAILURE_STATUS
            }
        }
    }

    /// Run `command` quietly and return its first output line on success.
    pub async fn probe(&self, command: &str) -> Option<String> {
        let output = self.runner.run_shell(command).await.ok()?;
        if !output.status.success() {
            return None;
        }
        let invocation = CommandInvocation::from_raw(command, &output.stdout, 0);
        invocation.first_line().map(str::to_owned)
    }

    /// Hand the terminal to `command` and wait for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be spawned.
    pub async fn run_interactive(&self, command: &str) -> Result<i32> {
        tracing::debug!(command, "running interactively");
        let status = self.runner.run_interactive(command).await?;
        Ok(status.code().unwrap_or(SIGNALLED_STATUS))
    }

    /// `<service_manager> <verb> <service>`, status only.
    pub async fn service_verb(&self, verb: &str, service: &str) -> i32 {
        let status = self
            .run_status(&format!("{} {verb} {service}", self.service_manager))
            .await;
        tracing::debug!(service, verb, status, "service command finished");
        status
    }

    /// Whether the service manager reports `service` active.
    ///
    /// Inactive, failed, missing services and query errors all yield `false`.
    pub async fn is_service_active(&self, service: &str) -> bool {
        self.service_verb("is-active --quiet", service).await == 0
    }

    /// The state token reported for `service`; `Unknown` when nothing
    /// usable comes back.
    pub async fn service_state(&self, service: &str) -> ServiceState {
        let command = format!("{} is-active {service} 2>/dev/null", self.service_manager);
        match self.runner.run_shell(&command).await {
            Ok(output) => CommandInvocation::from_raw(&command, &output.stdout, 0)
                .first_line()
                .map_or(ServiceState::Unknown, ServiceState::parse),
            Err(e) => {
                tracing::debug!(service, error = %e, "state query failed");
                ServiceState::Unknown
            }
        }
    }
}
