//! Privilege precondition: privileged commands must run without a prompt.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::application::services::runner::StepRunner;
use crate::domain::ProvisionError;

/// Run the profile's privilege check (normally `sudo -n true`).
///
/// # Errors
///
/// Returns `ProvisionError::PrivilegeRequired` if the check exits non-zero
/// or cannot be spawned.
pub async fn check_privileges<C: CommandRunner, R: ProgressReporter>(
    runner: &StepRunner<'_, C, R>,
    check: &str,
) -> Result<()> {
    let status = runner.run_status(check).await;
    if status != 0 {
        tracing::debug!(check, status, "privilege check failed");
        return Err(ProvisionError::PrivilegeRequired.into());
    }
    Ok(())
}
