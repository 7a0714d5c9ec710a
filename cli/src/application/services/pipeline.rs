//! Application service: the provisioning pipeline use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::{CommandRunner, FileWriter, ProgressReporter};
use crate::application::services::privilege::check_privileges;
use crate::application::services::runner::{SPAWN_FAILURE_STATUS, StepRunner};
use crate::application::services::service_activation::activate_services;
use crate::application::services::summary::{Summary, collect_summary};
use crate::domain::{
    ActivationOutcome, Profile, ProvisionError, ServiceReport, StepAction, StepDescriptor,
    StepOutcome, StepStatus, Task,
};

/// Everything a completed pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub profile: String,
    pub steps: Vec<StepOutcome>,
    pub services: Vec<ServiceReport>,
    pub summary: Summary,
}

impl PipelineReport {
    /// Services whose activation ended in `Failed`.
    #[must_use]
    pub fn failed_services(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|r| r.outcome == ActivationOutcome::Failed)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// How a single step ended, before severity is applied.
enum StepResult {
    Done,
    Failed { status: i32 },
    ServicesDown(Vec<String>),
}

/// Provision the system described by `profile`.
///
/// Runs the privilege check, then every step in order, then collects the
/// summary. The function never exits the process.
///
/// # Errors
///
/// - `ProvisionError::PrivilegeRequired` if the privilege check fails; no
///   step is attempted.
/// - `ProvisionError::StepFailed` for the first failing fatal step; no later
///   step is attempted.
pub async fn run_pipeline(
    profile: &Profile,
    commands: &impl CommandRunner,
    files: &impl FileWriter,
    reporter: &impl ProgressReporter,
) -> Result<PipelineReport> {
    let runner = StepRunner::new(commands, reporter, &profile.service_manager);

    check_privileges(&runner, &profile.privilege_check).await?;

    let mut steps = Vec::with_capacity(profile.steps.len());
    let mut services = Vec::new();

    for step in &profile.steps {
        tracing::info!(step = %step.name, "starting step");
        reporter.step(&format!("{}...", step.name));

        let result = run_step(&runner, profile, step, files, &mut services).await;
        let status = match result {
            StepResult::Done => {
                reporter.success(&format!("{}: done", step.name));
                StepStatus::Succeeded
            }
            StepResult::Failed { status } if step.is_fatal() => {
                tracing::debug!(step = %step.name, status, "fatal step failed");
                return Err(ProvisionError::StepFailed {
                    step: step.name.clone(),
                    status,
                }
                .into());
            }
            StepResult::Failed { status } => {
                let reason = format!("exit status {status}");
                reporter.warn(&format!("{} failed ({reason}); continuing", step.name));
                StepStatus::Warned { reason }
            }
            StepResult::ServicesDown(names) => {
                let reason = format!("not active: {}", names.join(", "));
                reporter.warn(&format!("{}: {reason}", step.name));
                StepStatus::Warned { reason }
            }
        };
        tracing::debug!(step = %step.name, ?status, "step finished");
        steps.push(StepOutcome {
            name: step.name.clone(),
            status,
        });
    }

    let summary = collect_summary(&runner, profile).await;
    Ok(PipelineReport {
        profile: profile.name.clone(),
        steps,
        services,
        summary,
    })
}

async fn run_step<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    profile: &Profile,
    step: &StepDescriptor,
    files: &impl FileWriter,
    services: &mut Vec<ServiceReport>,
) -> StepResult {
    match &step.action {
        StepAction::Commands { tasks } => run_tasks(runner, tasks, files).await,
        StepAction::Packages { packages } => {
            let status = runner
                .run_status(&profile.install_packages_command(packages))
                .await;
            if status == 0 {
                StepResult::Done
            } else {
                StepResult::Failed { status }
            }
        }
        StepAction::Services { services: specs } => {
            let reports = activate_services(runner, specs).await;
            let down: Vec<String> = reports
                .iter()
                .filter(|r| !r.outcome.is_active())
                .map(|r| r.name.clone())
                .collect();
            services.extend(reports);
            if down.is_empty() {
                StepResult::Done
            } else {
                StepResult::ServicesDown(down)
            }
        }
        StepAction::Interactive {
            command,
            settle_secs,
            then,
        } => run_interactive(runner, command, *settle_secs, then).await,
    }
}

/// Run tasks in order. A failing required command stops the step;
/// other failures have already been echoed and are tolerated.
async fn run_tasks<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    tasks: &[Task],
    files: &impl FileWriter,
) -> StepResult {
    for task in tasks {
        match task {
            Task::Run { run, required } => {
                let status = runner.run_status(run).await;
                if status != 0 && *required {
                    return StepResult::Failed { status };
                }
            }
            Task::Write { write, contents } => {
                if let Err(e) = files.write_file(write, contents) {
                    tracing::warn!(path = %write.display(), error = %e, "file write failed");
                    runner.reporter().output_line(&format!("{e:#}"));
                }
            }
        }
    }
    StepResult::Done
}

async fn run_interactive<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    command: &str,
    settle_secs: u64,
    then: &[String],
) -> StepResult {
    runner
        .reporter()
        .handover(&format!("'{command}' will prompt you; answer its questions."));
    if settle_secs > 0 {
        tokio::time::sleep(Duration::from_secs(settle_secs)).await;
    }

    let status = match runner.run_interactive(command).await {
        Ok(status) => status,
        Err(e) => {
            runner.reporter().output_line(&format!("{e:#}"));
            SPAWN_FAILURE_STATUS
        }
    };

    for follow_up in then {
        runner.run_status(follow_up).await;
    }

    if status == 0 {
        StepResult::Done
    } else {
        StepResult::Failed { status }
    }
}
