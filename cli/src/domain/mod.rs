//! Domain layer: pure types, profiles, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod error;
pub mod invocation;
pub mod profile;
pub mod service;
pub mod step;

pub use error::{ProfileError, ProvisionError, error_code};
pub use invocation::CommandInvocation;
pub use profile::{AccessHint, PlannedStep, Profile, SummarySpec};
pub use service::{ActivationOutcome, ServiceReport, ServiceState};
pub use step::{ServiceSpec, Severity, StepAction, StepDescriptor, StepOutcome, StepStatus, Task};
