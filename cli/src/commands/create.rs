//! `openclaw-manager create <name>`: provision and register a new instance.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::instance_create::{self as service, CreateOptions};
use crate::infra::fs::LocalFs;
use crate::infra::token::RandomTokens;

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Name of the new instance (lowercase letters, digits, inner hyphens)
    pub name: String,
}

/// Run `openclaw-manager create <name>`.
///
/// # Errors
///
/// Returns an error if the name is invalid or taken, a template is missing,
/// or any provisioning step fails.
pub async fn run(args: &CreateArgs, app: &AppContext) -> Result<()> {
    let reporter = app.terminal_reporter();
    let created = service::create_instance(
        &app.registry,
        &app.templates,
        &LocalFs,
        &RandomTokens,
        &app.systemctl,
        CreateOptions {
            config: &app.config,
            reporter: &reporter,
            name: &args.name,
        },
    )
    .await?;

    let ctx = &app.output;
    if !ctx.quiet {
        ctx.header(&format!("Instance '{}'", created.name));
        ctx.kv("Gateway:", &format!("127.0.0.1:{}", created.ports.gateway));
        ctx.kv("Bridge:", &format!("127.0.0.1:{}", created.ports.bridge));
        ctx.kv("State:", &created.paths.state_dir.display().to_string());
        ctx.kv("Workspace:", &created.paths.workspace_dir.display().to_string());
        ctx.kv("Start:", &format!("openclaw-manager start {}", created.name));
    }
    Ok(())
}
