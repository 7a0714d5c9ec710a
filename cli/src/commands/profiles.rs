//! `devstack profiles`: list built-in profiles.

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::Profile;

/// Run the profiles command.
///
/// # Errors
///
/// Returns an error if an embedded profile fails to parse.
pub fn run(app: &AppContext) -> Result<()> {
    let profiles = Profile::builtin_names()
        .into_iter()
        .map(Profile::builtin)
        .collect::<Result<Vec<_>>>()?;
    app.renderer().profiles(&profiles)
}
