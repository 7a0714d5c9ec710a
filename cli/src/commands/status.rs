//! `devstack status`: current state of a profile's managed services.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::runner::StepRunner;
use crate::application::services::summary::service_states;
use crate::commands::ProfileArgs;
use crate::infra::profile_store::load_profile;

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or rendering fails.
pub async fn run(args: &ProfileArgs, app: &AppContext) -> Result<()> {
    let profile = load_profile(&args.source())?;
    let reporter = app.terminal_reporter();
    let runner = StepRunner::new(&app.runner, &reporter, &profile.service_manager);

    let services = service_states(&runner, &profile).await;
    app.renderer().status(&profile.name, &services)
}
