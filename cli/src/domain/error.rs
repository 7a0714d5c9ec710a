//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Fatal outcomes that halt the provisioning pipeline.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "This tool needs privileged access without a password prompt. \
         Run it with sudo or as a member of the sudoers group."
    )]
    PrivilegeRequired,

    #[error("Step '{step}' failed with exit status {status}.")]
    StepFailed { step: String, status: i32 },

    #[error("devstack install must be run from an interactive terminal.")]
    NotInteractive,

    #[error("Installation cancelled.")]
    Cancelled,
}

// ── Profile errors ────────────────────────────────────────────────────────────

/// Errors raised while resolving or validating a provisioning profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Unknown profile '{name}'.\n\nBuilt-in profiles: {available}")]
    NotFound { name: String, available: String },

    #[error("Profile has no name.")]
    MissingName,

    #[error("Profile '{0}' has no steps.")]
    NoSteps(String),

    #[error("Step #{index} has no name.")]
    UnnamedStep { index: usize },

    #[error("Duplicate step name '{0}'.")]
    DuplicateStep(String),

    #[error("Invalid package name '{name}' in step '{step}'.")]
    InvalidPackage { step: String, name: String },

    #[error("Invalid service name '{name}' in step '{step}'.")]
    InvalidService { step: String, name: String },

    #[error("Step '{0}' has nothing to do.")]
    EmptyStep(String),
}

impl ProvisionError {
    /// Stable machine-readable code for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PrivilegeRequired => "privilege_required",
            Self::StepFailed { .. } => "step_failed",
            Self::NotInteractive => "not_interactive",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Machine-readable code for any error surfaced by a command.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ProvisionError>() {
        return e.code();
    }
    if err.chain().any(|cause| cause.is::<ProfileError>()) {
        return "invalid_profile";
    }
    "error"
}
