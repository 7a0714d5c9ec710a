//! `devstack install`: provision the stack described by a profile.

use std::io::IsTerminal as _;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::pipeline::run_pipeline;
use crate::commands::ProfileArgs;
use crate::domain::ProvisionError;
use crate::infra::fs::LocalFs;
use crate::infra::profile_store::load_profile;

/// Arguments for the install command.
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Refuse to run unless attached to an interactive terminal.
///
/// # Errors
///
/// Returns `ProvisionError::NotInteractive` when stdin is not a terminal.
pub fn ensure_interactive() -> Result<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(ProvisionError::NotInteractive.into())
    }
}

/// Run `devstack install`.
///
/// Service activation failures do not make this fail; they are reported in
/// the summary.
///
/// # Errors
///
/// Returns an error if the entry gate, profile loading, the privilege check
/// or a fatal step fails.
pub async fn run(args: &InstallArgs, app: &AppContext) -> Result<()> {
    ensure_interactive()?;
    let profile = load_profile(&args.profile.source())?;

    app.output.header(&format!("=== {} ===", title(&profile.title, &profile.name)));
    if !profile.description.is_empty() {
        app.output.info(&profile.description);
    }
    let prompt = format!(
        "Provision '{}' ({} steps, sudo required)?",
        profile.name,
        profile.steps.len()
    );
    if !app.confirm(&prompt, true)? {
        return Err(ProvisionError::Cancelled.into());
    }

    let report = {
        let reporter = app.terminal_reporter();
        run_pipeline(&profile, &app.runner, &LocalFs, &reporter).await?
    };
    tracing::info!(
        profile = %report.profile,
        failed_services = report.failed_services().len(),
        "pipeline finished"
    );

    app.renderer().report(&report)
}

fn title<'a>(title: &'a str, name: &'a str) -> &'a str {
    if title.is_empty() { name } else { title }
}
