//! Managed service state and verification outcomes.

use std::fmt;

use serde::Serialize;

/// Observed state of a service, as reported by `systemctl is-active`.
///
/// Derived freshly from the service manager on every query and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Active,
    Inactive,
    Failed,
    Activating,
    Deactivating,
    Reloading,
    Unknown,
}

impl ServiceState {
    /// Parse the first token printed by `systemctl is-active`.
    ///
    /// Anything unrecognised, including empty output, maps to `Unknown`.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "failed" => Self::Failed,
            "activating" => Self::Activating,
            "deactivating" => Self::Deactivating,
            "reloading" => Self::Reloading,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Failed => "failed",
            Self::Activating => "activating",
            Self::Deactivating => "deactivating",
            Self::Reloading => "reloading",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of the enable/start/restart/verify sequence for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// Active on first verification.
    Active,
    /// Inactive at first, active after the single retry.
    Recovered,
    /// Still inactive after the retry.
    Failed,
}

impl ActivationOutcome {
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Activation result for one managed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    pub name: String,
    pub outcome: ActivationOutcome,
}
