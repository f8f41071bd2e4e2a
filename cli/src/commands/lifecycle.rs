//! `openclaw-manager start|stop|restart <name>`.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::instance_control::{ControlAction, control_instance};
use crate::commands::InstanceArgs;

/// Run a start, stop, or restart.
///
/// # Errors
///
/// Returns `NotFound` for unregistered names, or `SubprocessFailure` with
/// systemctl's exit code.
pub async fn run(args: &InstanceArgs, app: &AppContext, action: ControlAction) -> Result<()> {
    control_instance(
        &app.registry,
        &app.systemctl,
        &app.terminal_reporter(),
        &app.config.layout(),
        &args.name,
        action,
    )
    .await?;
    Ok(())
}
