//! `devstack plan`: show what `install` would run, without running it.

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::ProfileArgs;
use crate::infra::profile_store::load_profile;

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub fn run(args: &ProfileArgs, app: &AppContext) -> Result<()> {
    let profile = load_profile(&args.source())?;
    app.renderer().plan(&profile)
}
