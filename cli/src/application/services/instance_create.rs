//! Application service: instance creation use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Creation is not transactional: a failure after the directories exist
//! leaves them on disk with no registry record.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{
    InstanceRegistry, LocalFs, ProgressReporter, ServiceManager, TemplateSource, TokenSource,
};
use crate::application::services::ensure_success;
use crate::domain::registry::next_port_pair;
use crate::domain::secret::env_file_contents;
use crate::domain::{
    InstanceError, InstanceName, InstancePaths, ManagerConfig, PortPair, RegistryRecord, Template,
    TemplateField, TemplateKind, derive_paths,
};

/// Inputs to [`create_instance`].
pub struct CreateOptions<'a, R: ProgressReporter> {
    pub config: &'a ManagerConfig,
    pub reporter: &'a R,
    pub name: &'a str,
}

/// A freshly registered instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedInstance {
    pub name: InstanceName,
    pub ports: PortPair,
    pub paths: InstancePaths,
}

/// Validate a name for a new instance.
///
/// # Errors
///
/// Returns `Protected` for `default` and `InvalidName` for anything that does
/// not match the naming pattern.
pub fn parse_new_name(raw: &str) -> Result<InstanceName, InstanceError> {
    match InstanceName::parse(raw)? {
        InstanceName::Default => Err(InstanceError::Protected(raw.to_string(), "recreated")),
        named @ InstanceName::Named(_) => Ok(named),
    }
}

/// Create, render, and register a new instance, then reload unit files.
///
/// Steps:
/// 1. Validate the name and load both templates (nothing touched yet)
/// 2. Under the registry lock: reject duplicates, allocate ports, render,
///    create directories, write config/unit/env files, append the record
/// 3. Reload the service manager so the quadlet becomes a unit
///
/// # Errors
///
/// Returns `InvalidName`, `Protected`, `AlreadyExists`, `TemplateMissing`,
/// a template render error, or any filesystem / subprocess failure.
pub async fn create_instance(
    registry: &impl InstanceRegistry,
    templates: &impl TemplateSource,
    local_fs: &impl LocalFs,
    tokens: &impl TokenSource,
    services: &impl ServiceManager,
    opts: CreateOptions<'_, impl ProgressReporter>,
) -> Result<CreatedInstance> {
    let CreateOptions {
        config,
        reporter,
        name,
    } = opts;
    let name = parse_new_name(name)?;

    let unit = Template::parse(TemplateKind::Unit, &templates.load(TemplateKind::Unit)?)?;
    let gateway_config =
        Template::parse(TemplateKind::Config, &templates.load(TemplateKind::Config)?)?;

    let created = {
        let _lock = registry.lock()?;
        if registry.exists(&name)? {
            return Err(InstanceError::AlreadyExists(name.to_string()).into());
        }
        let ports = next_port_pair(&registry.records()?, config.default_gateway_port)?;
        let paths = derive_paths(&config.layout(), &name);

        let values = config
            .base_template_values()
            .with(TemplateField::Name, name.as_str())
            .with(TemplateField::GatewayPort, ports.gateway.to_string())
            .with(TemplateField::BridgePort, ports.bridge.to_string())
            .with(TemplateField::StateDir, paths.state_dir.to_string_lossy())
            .with(TemplateField::WorkspaceDir, paths.workspace_dir.to_string_lossy());
        let unit_text = unit.render(&values)?;
        let config_text = gateway_config.render(&values)?;

        reporter.step(&format!(
            "creating '{name}' on ports {}/{}...",
            ports.gateway, ports.bridge
        ));
        for dir in [
            &paths.state_dir,
            &paths.workspace_dir,
            &config.shared_skills_dir,
            &config.quadlet_dir,
        ] {
            local_fs.create_dir_all(dir)?;
        }

        local_fs
            .write(&paths.config_file(), &config_text)
            .context("writing gateway config")?;
        local_fs
            .write(&paths.unit_file, &unit_text)
            .context("writing quadlet unit")?;

        let env_file: PathBuf = paths.env_file();
        local_fs
            .write(&env_file, &env_file_contents(&tokens.generate()))
            .context("writing gateway token")?;
        local_fs.set_permissions(&env_file, 0o600)?;

        registry.append(&RegistryRecord::new(name.as_str(), ports))?;
        tracing::info!(instance = %name, gateway = ports.gateway, bridge = ports.bridge, "instance registered");

        CreatedInstance { name, ports, paths }
    };

    reporter.step("reloading systemd user units...");
    ensure_success("systemctl", services.daemon_reload().await?)?;

    reporter.success(&format!("instance '{}' created", created.name));
    Ok(created)
}
