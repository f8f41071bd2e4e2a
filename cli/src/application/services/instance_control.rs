//! Application service: start/stop/restart and journal access.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! The service manager's exit status is the operation's result; no health
//! check follows.

use anyhow::Result;

use crate::application::ports::{InstanceRegistry, ProgressReporter, ServiceManager};
use crate::application::services::{ensure_success, require_registered};
use crate::domain::{InstanceName, PathLayout, derive_paths};

/// A unit state transition delegated to the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
    Restart,
}

impl ControlAction {
    fn verb(self) -> &'static str {
        match self {
            ControlAction::Start => "starting",
            ControlAction::Stop => "stopping",
            ControlAction::Restart => "restarting",
        }
    }

    fn done(self) -> &'static str {
        match self {
            ControlAction::Start => "started",
            ControlAction::Stop => "stopped",
            ControlAction::Restart => "restarted",
        }
    }
}

/// Apply `action` to the registered instance `raw_name`.
///
/// # Errors
///
/// Returns `NotFound` if the instance is not registered, or
/// `SubprocessFailure` carrying the service manager's exit code.
pub async fn control_instance(
    registry: &impl InstanceRegistry,
    services: &impl ServiceManager,
    reporter: &impl ProgressReporter,
    layout: &PathLayout,
    raw_name: &str,
    action: ControlAction,
) -> Result<InstanceName> {
    let (name, _) = require_registered(registry, raw_name)?;
    let service = derive_paths(layout, &name).service_name;

    reporter.step(&format!("{} {service}...", action.verb()));
    tracing::debug!(instance = %name, ?action, "delegating to service manager");
    let status = match action {
        ControlAction::Start => services.start(&service).await?,
        ControlAction::Stop => services.stop(&service).await?,
        ControlAction::Restart => services.restart(&service).await?,
    };
    ensure_success("systemctl", status)?;

    reporter.success(&format!("instance '{name}' {}", action.done()));
    Ok(name)
}

/// Stream the last `lines` journal lines of a registered instance.
///
/// # Errors
///
/// Returns `NotFound` if the instance is not registered, or
/// `SubprocessFailure` if the journal query fails.
pub async fn show_logs(
    registry: &impl InstanceRegistry,
    services: &impl ServiceManager,
    layout: &PathLayout,
    raw_name: &str,
    lines: u32,
    follow: bool,
) -> Result<()> {
    let (name, _) = require_registered(registry, raw_name)?;
    let service = derive_paths(layout, &name).service_name;
    let status = services.journal(&service, lines, follow).await?;
    ensure_success("journalctl", status)
}
