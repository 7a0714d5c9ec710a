//! Final summary: live service states, installed versions, access hints.

use serde::Serialize;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::application::services::runner::StepRunner;
use crate::domain::{AccessHint, Profile, ServiceState};

/// Shown for a version probe that fails or prints nothing.
pub const UNAVAILABLE: &str = "unavailable";

/// A service and the state the service manager reports right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatusLine {
    pub name: String,
    pub state: ServiceState,
}

/// A version probe and the first line it printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionLine {
    pub command: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub installed: Vec<String>,
    pub extensions: Vec<String>,
    pub services: Vec<ServiceStatusLine>,
    pub versions: Vec<VersionLine>,
    pub access: Vec<AccessHint>,
}

/// Query the current state of every managed service of `profile`.
pub async fn service_states<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    profile: &Profile,
) -> Vec<ServiceStatusLine> {
    let mut lines = Vec::new();
    for name in profile.services() {
        lines.push(ServiceStatusLine {
            name: name.to_string(),
            state: runner.service_state(name).await,
        });
    }
    lines
}

/// Build the summary for `profile` from fresh queries.
pub async fn collect_summary<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    profile: &Profile,
) -> Summary {
    let services = service_states(runner, profile).await;

    let mut versions = Vec::with_capacity(profile.summary.versions.len());
    for command in &profile.summary.versions {
        let version = runner
            .probe(command)
            .await
            .filter(|line| !line.trim().is_empty())
            .unwrap_or_else(|| UNAVAILABLE.to_string());
        versions.push(VersionLine {
            command: command.clone(),
            version,
        });
    }

    Summary {
        title: if profile.title.is_empty() {
            profile.name.clone()
        } else {
            profile.title.clone()
        },
        installed: profile.summary.installed.clone(),
        extensions: profile.summary.extensions.clone(),
        services,
        versions,
        access: profile.summary.access.clone(),
    }
}
