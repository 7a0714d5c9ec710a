//! Provisioning profiles: the product variants expressed as data.
//!
//! Pure functions only: no I/O or async. Built-in profiles are embedded
//! YAML documents parsed on demand.

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ProfileError;
use crate::domain::step::{ServiceSpec, Severity, StepAction, StepDescriptor, Task};

// ── Validation patterns ──────────────────────────────────────────────────────

/// Debian package names (policy §5.6.1), plus an optional `:arch` suffix.
pub static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9][a-z0-9+.\-]*(:[a-z0-9]+)?$").expect("valid regex")
});

/// systemd unit names, optionally with a template instance.
pub static SERVICE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9@._:\-]*$").expect("valid regex")
});

// ── Built-in profiles ────────────────────────────────────────────────────────

const BUILTIN: &[(&str, &str)] = &[
    ("debian12", include_str!("../../profiles/debian12.yaml")),
    ("debian12-mariadb", include_str!("../../profiles/debian12-mariadb.yaml")),
];

// ── Profile schema ───────────────────────────────────────────────────────────

/// An ordered provisioning plan plus the data shown in the final summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Must exit 0 without prompting for a password.
    #[serde(default = "default_privilege_check")]
    pub privilege_check: String,
    /// Prefix for package installation; packages are appended.
    #[serde(default = "default_install_command")]
    pub install_command: String,
    /// Prefix for service-manager verbs (`enable`, `is-active`, ...).
    #[serde(default = "default_service_manager")]
    pub service_manager: String,
    pub steps: Vec<StepDescriptor>,
    #[serde(default)]
    pub summary: SummarySpec,
}

/// Static summary content carried by a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySpec {
    /// One line per installed component.
    pub installed: Vec<String>,
    /// Installed PHP extensions, a few per line.
    pub extensions: Vec<String>,
    /// Commands whose first output line reports an installed version.
    pub versions: Vec<String>,
    /// Where to reach the installed services.
    pub access: Vec<AccessHint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessHint {
    pub label: String,
    pub value: String,
}

/// A step as it would run: name, failure policy and exact commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub name: String,
    pub severity: Severity,
    pub commands: Vec<String>,
}

fn default_privilege_check() -> String {
    "sudo -n true".to_string()
}

fn default_install_command() -> String {
    "sudo apt install -y".to_string()
}

fn default_service_manager() -> String {
    "sudo systemctl".to_string()
}

impl Profile {
    /// Names of all built-in profiles, in declaration order.
    #[must_use]
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN.iter().map(|(name, _)| *name).collect()
    }

    /// Load a built-in profile by name.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` for an unknown name, or a parse
    /// error if the embedded document is malformed.
    pub fn builtin(name: &str) -> Result<Self> {
        let (_, text) = BUILTIN
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| ProfileError::NotFound {
                name: name.to_string(),
                available: Self::builtin_names().join(", "),
            })?;
        Self::from_yaml(text).with_context(|| format!("built-in profile '{name}'"))
    }

    /// Parse and validate a profile document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the profile fails
    /// validation.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(text).context("cannot parse profile")?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check names that end up interpolated into command strings.
    ///
    /// # Errors
    ///
    /// Returns the first `ProfileError` found.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::MissingName);
        }
        if self.steps.is_empty() {
            return Err(ProfileError::NoSteps(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            if step.name.trim().is_empty() {
                return Err(ProfileError::UnnamedStep { index: index + 1 });
            }
            if !seen.insert(step.name.as_str()) {
                return Err(ProfileError::DuplicateStep(step.name.clone()));
            }
            validate_action(step)?;
        }
        Ok(())
    }

    /// Every managed service named by a `services` step, in order, without
    /// duplicates.
    #[must_use]
    pub fn services(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.steps
            .iter()
            .filter_map(|step| match &step.action {
                StepAction::Services { services } => Some(services),
                _ => None,
            })
            .flatten()
            .map(|svc| svc.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Full install command for a package list.
    #[must_use]
    pub fn install_packages_command(&self, packages: &[String]) -> String {
        format!("{} {}", self.install_command, packages.join(" "))
    }

    /// `<service_manager> <verb> <name>`.
    #[must_use]
    pub fn service_command(&self, verb: &str, name: &str) -> String {
        format!("{} {verb} {name}", self.service_manager)
    }

    /// Every step with the commands it would run, privilege check first.
    #[must_use]
    pub fn plan(&self) -> Vec<PlannedStep> {
        let precondition = PlannedStep {
            name: "Check privileges".to_string(),
            severity: Severity::Fatal,
            commands: vec![self.privilege_check.clone()],
        };
        std::iter::once(precondition)
            .chain(self.steps.iter().map(|step| PlannedStep {
                name: step.name.clone(),
                severity: step.severity,
                commands: self.planned_commands(step),
            }))
            .collect()
    }

    /// The commands a step would run, in order. File writes are shown as
    /// `write <path>`.
    #[must_use]
    pub fn planned_commands(&self, step: &StepDescriptor) -> Vec<String> {
        match &step.action {
            StepAction::Commands { tasks } => tasks
                .iter()
                .map(|task| match task {
                    Task::Run { run, .. } => run.clone(),
                    Task::Write { write, .. } => format!("write {}", write.display()),
                })
                .collect(),
            StepAction::Packages { packages } => vec![self.install_packages_command(packages)],
            StepAction::Services { services } => {
                let mut cmds = Vec::new();
                for verb in ["enable", "start", "restart"] {
                    cmds.extend(services.iter().map(|s| self.service_command(verb, &s.name)));
                }
                cmds.extend(
                    services
                        .iter()
                        .map(|s| self.service_command("is-active --quiet", &s.name)),
                );
                cmds
            }
            StepAction::Interactive { command, then, .. } => {
                std::iter::once(command.clone()).chain(then.iter().cloned()).collect()
            }
        }
    }
}

fn validate_action(step: &StepDescriptor) -> Result<(), ProfileError> {
    match &step.action {
        StepAction::Commands { tasks } if tasks.is_empty() => {
            Err(ProfileError::EmptyStep(step.name.clone()))
        }
        StepAction::Commands { .. } | StepAction::Interactive { .. } => Ok(()),
        StepAction::Packages { packages } => {
            if packages.is_empty() {
                return Err(ProfileError::EmptyStep(step.name.clone()));
            }
            match packages.iter().find(|p| !PACKAGE_NAME_RE.is_match(p)) {
                Some(bad) => Err(ProfileError::InvalidPackage {
                    step: step.name.clone(),
                    name: bad.clone(),
                }),
                None => Ok(()),
            }
        }
        StepAction::Services { services } => {
            if services.is_empty() {
                return Err(ProfileError::EmptyStep(step.name.clone()));
            }
            match services.iter().find(|s| !is_valid_service(s)) {
                Some(bad) => Err(ProfileError::InvalidService {
                    step: step.name.clone(),
                    name: bad.name.clone(),
                }),
                None => Ok(()),
            }
        }
    }
}

fn is_valid_service(svc: &ServiceSpec) -> bool {
    SERVICE_NAME_RE.is_match(&svc.name)
}
