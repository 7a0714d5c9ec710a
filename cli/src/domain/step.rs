//! Step descriptors: one named unit of provisioning work.
//!
//! Steps are data. Each profile is an ordered list of descriptors, so the
//! product variants differ only in configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What happens to the pipeline when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Failure halts the pipeline with a non-zero exit.
    Fatal,
    /// Failure is logged and the pipeline continues.
    Advisory,
}

/// A named step with its failure policy and action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub name: String,
    pub severity: Severity,
    pub action: StepAction,
}

/// The work a step performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    /// Ordered shell commands and file writes.
    Commands { tasks: Vec<Task> },
    /// One package-manager install of the listed packages.
    Packages { packages: Vec<String> },
    /// Enable, start and verify the listed services.
    Services { services: Vec<ServiceSpec> },
    /// Hand the terminal to a command that prompts the operator directly.
    Interactive {
        command: String,
        #[serde(default)]
        settle_secs: u64,
        #[serde(default)]
        then: Vec<String>,
    },
}

/// One entry of a `commands` step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Task {
    /// Run a shell command. A failing required command fails the step.
    Run {
        run: String,
        #[serde(default)]
        required: bool,
    },
    /// Write `contents` to a local path.
    Write { write: PathBuf, contents: String },
}

/// A managed service and the pause allowed for its daemon to come up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    #[serde(default)]
    pub settle_secs: u64,
}

/// Outcome recorded for a step that did not halt the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    /// Advisory failure, or a step that completed with failed services.
    Warned { reason: String },
}

/// A step name together with its recorded status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl StepDescriptor {
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}
