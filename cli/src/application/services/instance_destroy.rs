//! Application service: instance destruction use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Registration is always revoked once the operator confirms, whatever they
//! choose for the data directories.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{
    Confirmer, InstanceRegistry, LocalFs, ProgressReporter, ServiceManager,
};
use crate::application::services::{ensure_success, require_registered};
use crate::domain::destroy::ensure_destroyable;
use crate::domain::{
    DestroyAnswers, DestroyOutcome, DestroyQuestion, InstanceError, InstanceName, PathLayout,
    derive_paths,
};

/// Inputs to [`destroy_instance`].
pub struct DestroyOptions<'a, R: ProgressReporter> {
    pub layout: &'a PathLayout,
    pub reporter: &'a R,
    pub name: &'a str,
    /// Answers supplied up front; unanswered questions go to the `Confirmer`.
    pub answers: DestroyAnswers,
}

/// Destroy a registered, non-default instance.
///
/// Steps, after the operator confirms:
/// 1. Stop the service if active
/// 2. Remove the unit file and reload the service manager
/// 3. Optionally delete the state directory, then the workspace directory
/// 4. Remove the registry record (under the registry lock)
///
/// # Errors
///
/// Returns `Protected` for `default`, `NotFound` for unregistered names
/// (both before any prompt), or the first failing step's error.
pub async fn destroy_instance(
    registry: &impl InstanceRegistry,
    services: &impl ServiceManager,
    local_fs: &impl LocalFs,
    confirmer: &impl Confirmer,
    opts: DestroyOptions<'_, impl ProgressReporter>,
) -> Result<DestroyOutcome> {
    let DestroyOptions {
        layout,
        reporter,
        name,
        answers,
    } = opts;

    if let Ok(parsed) = InstanceName::parse(name) {
        ensure_destroyable(&parsed)?;
    }
    let (name, _) = require_registered(registry, name)?;

    let ask = |question: DestroyQuestion| -> Result<bool> {
        match answers.answer(question) {
            Some(answer) => Ok(answer),
            None => confirmer.confirm(&question.prompt(&name), false),
        }
    };

    if !ask(DestroyQuestion::Proceed)? {
        tracing::debug!(instance = %name, "destroy declined");
        return Ok(DestroyOutcome::Aborted);
    }

    let paths = derive_paths(layout, &name);

    if services.is_active(&paths.service_name).await? {
        reporter.step(&format!("stopping {}...", paths.service_name));
        ensure_success("systemctl", services.stop(&paths.service_name).await?)?;
    }

    if local_fs.exists(&paths.unit_file) {
        reporter.step("removing unit file...");
        local_fs
            .remove_file(&paths.unit_file)
            .context("removing quadlet unit")?;
    }
    ensure_success("systemctl", services.daemon_reload().await?)?;

    let state_deleted = ask(DestroyQuestion::DeleteState)?;
    if state_deleted {
        remove_dir(local_fs, reporter, &paths.state_dir)?;
    }
    let workspace_deleted = ask(DestroyQuestion::DeleteWorkspace)?;
    if workspace_deleted {
        remove_dir(local_fs, reporter, &paths.workspace_dir)?;
    }

    {
        let _lock = registry.lock()?;
        if !registry.exists(&name)? {
            return Err(InstanceError::NotFound(name.to_string()).into());
        }
        registry.remove(&name)?;
    }
    tracing::info!(instance = %name, state_deleted, workspace_deleted, "instance unregistered");

    reporter.success(&format!("instance '{name}' destroyed"));
    if !state_deleted {
        reporter.warn(&format!("state kept at {}", paths.state_dir.display()));
    }
    if !workspace_deleted {
        reporter.warn(&format!(
            "workspace kept at {}",
            paths.workspace_dir.display()
        ));
    }

    Ok(DestroyOutcome::Destroyed {
        state_deleted,
        workspace_deleted,
    })
}

fn remove_dir(local_fs: &impl LocalFs, reporter: &impl ProgressReporter, dir: &Path) -> Result<()> {
    if local_fs.exists(dir) {
        reporter.step(&format!("deleting {}...", dir.display()));
        local_fs.remove_dir_all(dir)?;
    }
    Ok(())
}
