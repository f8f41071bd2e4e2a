//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::app::{AppContext, GlobalFlags};
use crate::application::ports::InstanceRegistry;
use crate::application::services::identity::verify_identity;
use crate::application::services::instance_control::ControlAction;
use crate::commands;
use crate::infra::config::YamlConfigSource;
use crate::infra::identity::SystemIdentity;

/// Run several isolated OpenClaw gateways side by side under systemd
#[derive(Parser)]
#[command(name = "openclaw-manager", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format (list, status)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Confirm destructive prompts; remaining prompts take their default
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create and register a new instance
    Create(commands::create::CreateArgs),

    /// List every instance with its state
    List,

    /// Start an instance
    Start(commands::InstanceArgs),

    /// Stop an instance
    Stop(commands::InstanceArgs),

    /// Restart an instance
    Restart(commands::InstanceArgs),

    /// Remove an instance (asks before deleting data)
    Destroy(commands::destroy::DestroyArgs),

    /// Show or edit an instance's gateway config
    Config(commands::config::ConfigArgs),

    /// Show an instance's state, ports, paths and container
    Status(commands::InstanceArgs),

    /// Show an instance's journal
    Logs(commands::logs::LogsArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Without a subcommand, prints help. Otherwise resolves configuration,
    /// checks the caller is the service user, and makes sure the registry
    /// exists before dispatching.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the identity check, or the command
    /// fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            command,
        } = self;
        let Some(command) = command else {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        };

        let config = YamlConfigSource.resolve()?;
        verify_identity(&SystemIdentity, &config.service_user)?;

        let flags = GlobalFlags {
            no_color,
            quiet,
            json,
            yes,
        };
        let app = AppContext::new(&flags, config);
        app.registry.ensure()?;

        match command {
            Command::Create(args) => commands::create::run(&args, &app).await,
            Command::List => commands::list::run(&app).await,
            Command::Start(args) => {
                commands::lifecycle::run(&args, &app, ControlAction::Start).await
            }
            Command::Stop(args) => commands::lifecycle::run(&args, &app, ControlAction::Stop).await,
            Command::Restart(args) => {
                commands::lifecycle::run(&args, &app, ControlAction::Restart).await
            }
            Command::Destroy(args) => commands::destroy::run(&args, &app).await,
            Command::Config(args) => commands::config::run(&args, &app).await,
            Command::Status(args) => commands::status::run(&args, &app).await,
            Command::Logs(args) => commands::logs::run(&args, &app).await,
        }
    }
}
