//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::pipeline::PipelineReport;
use crate::application::services::summary::ServiceStatusLine;
use crate::domain::{ActivationOutcome, Profile, ServiceState, Severity};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("devstack {version}");
    }

    /// Render the ordered steps of a profile and the commands they run.
    pub fn render_plan(&self, profile: &Profile) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header(&format!("{} ({})", title_of(profile), profile.name));
        println!();
        for (index, step) in profile.plan().iter().enumerate() {
            let severity = match step.severity {
                Severity::Fatal => "fatal".style(self.ctx.styles.error).to_string(),
                Severity::Advisory => "advisory".style(self.ctx.styles.warning).to_string(),
            };
            println!(
                "  {}. {}  [{severity}]",
                index + 1,
                step.name.style(self.ctx.styles.bold)
            );
            for command in &step.commands {
                println!("       {}", command.style(self.ctx.styles.dim));
            }
        }
        println!();
    }

    /// Render the list of available profiles.
    pub fn render_profiles(&self, profiles: &[Profile]) {
        if self.ctx.quiet {
            return;
        }
        println!("Available profiles:\n");
        for profile in profiles {
            println!("  {:<18} {}", profile.name, profile.description);
            println!(
                "  {:<18} {}",
                "",
                format!("services: {}", profile.services().join(", ")).style(self.ctx.styles.dim)
            );
        }
        println!("\nInstall one: devstack install --profile <name>");
    }

    /// Render the current state of a profile's managed services.
    pub fn render_status(&self, profile: &str, services: &[ServiceStatusLine]) {
        self.ctx.header(&format!("Services ({profile})"));
        for line in services {
            self.print_state(line);
        }
    }

    /// Render the final installation summary.
    pub fn render_report(&self, report: &PipelineReport) {
        if self.ctx.quiet {
            return;
        }
        let summary = &report.summary;
        println!();
        self.ctx.success("Installation complete!");
        println!();

        if !summary.installed.is_empty() {
            self.ctx.header("Installed");
            for item in &summary.installed {
                self.ctx.success(item);
            }
            println!();
        }

        if !summary.extensions.is_empty() {
            self.ctx.header("PHP extensions");
            for line in &summary.extensions {
                self.ctx.success(line);
            }
            println!();
        }

        if !report.services.is_empty() {
            self.ctx.header("Service activation");
            for svc in &report.services {
                match svc.outcome {
                    ActivationOutcome::Active => self.ctx.success(&format!("{} active", svc.name)),
                    ActivationOutcome::Recovered => {
                        self.ctx.success(&format!("{} active (after restart)", svc.name));
                    }
                    ActivationOutcome::Failed => self.ctx.error(&format!("{} failed", svc.name)),
                }
            }
            println!();
        }

        if !summary.services.is_empty() {
            self.ctx.header("Service status");
            for line in &summary.services {
                self.print_state(line);
            }
            println!();
        }

        if !summary.versions.is_empty() {
            self.ctx.header("Installed versions");
            for v in &summary.versions {
                self.ctx.kv(&format!("{:<24}", v.command), &v.version);
            }
            println!();
        }

        if !summary.access.is_empty() {
            self.ctx.header("Access");
            for hint in &summary.access {
                self.ctx.kv(&format!("{:<12}", format!("{}:", hint.label)), &hint.value);
            }
            println!();
        }

        let failed = report.failed_services();
        if !failed.is_empty() {
            self.ctx
                .warn(&format!("Not running: {}. Check: systemctl status <name>", failed.join(", ")));
        }
    }

    fn print_state(&self, line: &ServiceStatusLine) {
        let msg = format!("{}: {}", line.name, line.state);
        if line.state == ServiceState::Active {
            self.ctx.success(&msg);
        } else {
            self.ctx.warn(&msg);
        }
    }
}

fn title_of(profile: &Profile) -> &str {
    if profile.title.is_empty() {
        &profile.name
    } else {
        &profile.title
    }
}
