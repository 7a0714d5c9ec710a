//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Provision a local Debian development stack
#[derive(Parser)]
#[command(
    name = "devstack",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also set by `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip the confirmation prompt (also set by `DEVSTACK_YES` or `CI`)
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install and configure the development stack
    Install(commands::install::InstallArgs),

    /// Show the steps and commands install would run
    Plan(commands::ProfileArgs),

    /// List built-in profiles
    Profiles,

    /// Show the state of the profile's services
    Status(commands::ProfileArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose,
            command,
        } = self;
        crate::logging::init(verbose);

        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            yes,
        });

        match command {
            Command::Install(args) => commands::install::run(&args, &app).await,
            Command::Plan(args) => commands::plan::run(&args, &app),
            Command::Profiles => commands::profiles::run(&app),
            Command::Status(args) => commands::status::run(&args, &app).await,
            Command::Version => commands::version::run(&app),
        }
    }
}
