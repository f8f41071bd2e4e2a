//! Application service: read-only instance queries.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! State is always derived live from the service manager; nothing is cached.

use std::path::PathBuf;

use anyhow::{Context, Result};
use openclaw_common::{InstanceSummary, ListOutput, StatusOutput};

use crate::application::ports::{
    ContainerInspector, InstanceRegistry, LocalFs, ServiceManager,
};
use crate::application::services::require_registered;
use crate::domain::instance::derive_state;
use crate::domain::{InstanceName, InstanceState, PathLayout, derive_paths};

/// Current state of `service`. A failed query reads as `stopped`.
pub async fn live_state(services: &impl ServiceManager, service: &str) -> InstanceState {
    let active = match services.is_active(service).await {
        Ok(active) => active,
        Err(e) => {
            tracing::warn!(service, error = %e, "is-active query failed");
            return InstanceState::Stopped;
        }
    };
    if active {
        return InstanceState::Running;
    }
    let failed = services.is_failed(service).await.unwrap_or_else(|e| {
        tracing::warn!(service, error = %e, "is-failed query failed");
        false
    });
    derive_state(active, failed)
}

/// Every registered instance with its live state, in registry order.
///
/// Records whose name is no longer valid are still listed, with the service
/// name derived the same way as for any named instance.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub async fn list_instances(
    registry: &impl InstanceRegistry,
    services: &impl ServiceManager,
    layout: &PathLayout,
) -> Result<ListOutput> {
    let mut instances = Vec::new();
    for record in registry.records()? {
        let name = InstanceName::parse(&record.name)
            .unwrap_or_else(|_| InstanceName::Named(record.name.clone()));
        let service = derive_paths(layout, &name).service_name;
        let state = live_state(services, &service).await;
        instances.push(InstanceSummary {
            name: record.name,
            gateway_port: record.ports.gateway,
            bridge_port: record.ports.bridge,
            service,
            state,
        });
    }
    Ok(ListOutput { instances })
}

/// Detailed status of one registered instance.
///
/// # Errors
///
/// Returns `NotFound` if the instance is not registered, or an error if the
/// registry cannot be read.
pub async fn instance_status(
    registry: &impl InstanceRegistry,
    services: &impl ServiceManager,
    containers: &impl ContainerInspector,
    layout: &PathLayout,
    raw_name: &str,
) -> Result<StatusOutput> {
    let (name, ports) = require_registered(registry, raw_name)?;
    let paths = derive_paths(layout, &name);
    let state = live_state(services, &paths.service_name).await;

    let container = match containers.inspect(paths.container_name()).await {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::warn!(instance = %name, error = %e, "container inspect failed");
            None
        }
    };

    Ok(StatusOutput {
        name: name.to_string(),
        service: paths.service_name,
        state,
        gateway_port: ports.gateway,
        bridge_port: ports.bridge,
        state_dir: paths.state_dir.display().to_string(),
        workspace_dir: paths.workspace_dir.display().to_string(),
        unit_file: paths.unit_file.display().to_string(),
        container,
    })
}

/// Path of the rendered gateway config for a registered instance.
///
/// # Errors
///
/// Returns `NotFound` if the instance is not registered, or an error naming
/// the file when it is missing on disk.
pub fn resolve_config_file(
    registry: &impl InstanceRegistry,
    local_fs: &impl LocalFs,
    layout: &PathLayout,
    raw_name: &str,
) -> Result<PathBuf> {
    let (name, _) = require_registered(registry, raw_name)?;
    let file = derive_paths(layout, &name).config_file();
    if !local_fs.exists(&file) {
        return Err(anyhow::anyhow!("config file missing: {}", file.display()))
            .with_context(|| format!("instance '{name}' is registered but has no config"));
    }
    Ok(file)
}
