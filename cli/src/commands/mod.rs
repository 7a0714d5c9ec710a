//! Command implementations

pub mod install;
pub mod plan;
pub mod profiles;
pub mod status;
pub mod version;

use std::path::PathBuf;

use clap::Args;

use crate::infra::profile_store::ProfileSource;

/// Default profile when none is given.
pub const DEFAULT_PROFILE: &str = "debian12";

/// Profile selection shared by every command that needs one.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Built-in or user profile name (~/.devstack/profiles/<name>.yaml)
    #[arg(long, env = "DEVSTACK_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Load the profile from a YAML file instead; wins over --profile
    #[arg(long, value_name = "PATH")]
    pub profile_file: Option<PathBuf>,
}

impl ProfileArgs {
    /// Where to load the selected profile from. An explicit file wins over
    /// a name, including one taken from `DEVSTACK_PROFILE`.
    #[must_use]
    pub fn source(&self) -> ProfileSource {
        match &self.profile_file {
            Some(path) => ProfileSource::File(path.clone()),
            None => ProfileSource::Named(self.profile.clone()),
        }
    }
}
