//! Profile resolution: built-ins, user profiles, explicit files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{Profile, ProfileError};

/// Where a profile comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// A built-in name, or `~/.devstack/profiles/<name>.yaml`.
    Named(String),
    /// An explicit YAML file.
    File(PathBuf),
}

/// Directory holding user profiles (`~/.devstack/profiles`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_profiles_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".devstack").join("profiles"))
}

/// Resolve and load a profile.
///
/// # Errors
///
/// Returns an error if the profile cannot be found, read, parsed or
/// validated.
pub fn load_profile(source: &ProfileSource) -> Result<Profile> {
    match source {
        ProfileSource::Named(name) => {
            if Profile::builtin_names().contains(&name.as_str()) {
                return Profile::builtin(name);
            }
            match user_profiles_dir() {
                Ok(dir) => load_named_from(name, &dir),
                Err(_) => Profile::builtin(name),
            }
        }
        ProfileSource::File(path) => load_file(path),
    }
}

/// Load `<dir>/<name>.yaml`, falling back to the built-in lookup error when
/// no such file exists.
///
/// # Errors
///
/// Returns `ProfileError::NotFound` if no file exists, or a read/parse error.
pub fn load_named_from(name: &str, dir: &Path) -> Result<Profile> {
    let is_plain_name = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\']);
    let path = dir.join(format!("{name}.yaml"));
    if !is_plain_name || !path.is_file() {
        return Err(ProfileError::NotFound {
            name: name.to_string(),
            available: Profile::builtin_names().join(", "),
        }
        .into());
    }
    load_file(&path)
}

fn load_file(path: &Path) -> Result<Profile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loading profile file");
    Profile::from_yaml(&text).with_context(|| format!("invalid profile {}", path.display()))
}
