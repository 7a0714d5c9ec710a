//! Service activation: enable, start, restart, then verify with one retry.
//!
//! Results of the enable/start/restart commands are logged only. Whether a
//! service came up is decided solely by the verification that follows.

use std::time::Duration;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::application::services::runner::StepRunner;
use crate::domain::{ActivationOutcome, ServiceReport, ServiceSpec};

/// Drive every service through enable → start → restart, then verify each
/// one in order, restarting once more if it is not active.
///
/// Never fails: a service that stays inactive is recorded as
/// `ActivationOutcome::Failed` and the remaining services are still handled.
pub async fn activate_services<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    services: &[ServiceSpec],
) -> Vec<ServiceReport> {
    for verb in ["enable", "start", "restart"] {
        tracing::info!(verb, count = services.len(), "service phase");
        for svc in services {
            runner.service_verb(verb, &svc.name).await;
        }
    }

    let mut reports = Vec::with_capacity(services.len());
    for svc in services {
        let outcome = verify(runner, svc).await;
        reports.push(ServiceReport {
            name: svc.name.clone(),
            outcome,
        });
    }
    reports
}

async fn verify<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    svc: &ServiceSpec,
) -> ActivationOutcome {
    let reporter = runner.reporter();
    let name = svc.name.as_str();

    if svc.settle_secs > 0 {
        tokio::time::sleep(Duration::from_secs(svc.settle_secs)).await;
    }

    if runner.is_service_active(name).await {
        reporter.success(&format!("{name} active"));
        return ActivationOutcome::Active;
    }

    reporter.warn(&format!("{name} not active - restarting..."));
    runner.service_verb("restart", name).await;

    if runner.is_service_active(name).await {
        reporter.success(&format!("{name} restarted successfully"));
        ActivationOutcome::Recovered
    } else {
        reporter.error(&format!("Could not start {name}"));
        ActivationOutcome::Failed
    }
}
