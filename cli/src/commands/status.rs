//! `openclaw-manager status <name>`: state, ports, paths, container runtime.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::instance_query::instance_status;
use crate::commands::InstanceArgs;
use crate::output::human::HumanRenderer;
use crate::output::{json, progress};

/// Run `openclaw-manager status <name>`.
///
/// # Errors
///
/// Returns `NotFound` for unregistered names.
pub async fn run(args: &InstanceArgs, app: &AppContext) -> Result<()> {
    let spinner = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner("querying systemd and podman..."));
    let status = instance_status(
        &app.registry,
        &app.systemctl,
        &app.podman,
        &app.config.layout(),
        &args.name,
    )
    .await;
    if let Some(pb) = &spinner {
        progress::finish_clear(pb);
    }
    let status = status?;

    if app.is_json() {
        json::print(&status)
    } else {
        HumanRenderer::new(&app.output).render_status(&status);
        Ok(())
    }
}
