//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`; never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod identity;
pub mod instance_control;
pub mod instance_create;
pub mod instance_destroy;
pub mod instance_query;

use std::process::ExitStatus;

use anyhow::Result;

use crate::application::ports::InstanceRegistry;
use crate::domain::{InstanceError, InstanceName, PortPair};

/// Map a non-zero exit status to `SubprocessFailure`, keeping the code.
///
/// # Errors
///
/// Returns [`InstanceError::SubprocessFailure`] when `status` is not success.
pub fn ensure_success(program: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(InstanceError::SubprocessFailure {
        program: program.to_string(),
        code: status.code(),
    }
    .into())
}

/// Resolve `raw` to a registered instance and its ports.
///
/// A name that fails validation can never be registered, so it is reported
/// as not found.
///
/// # Errors
///
/// Returns [`InstanceError::NotFound`] if no record matches, or an error if
/// the registry cannot be read.
pub fn require_registered(
    registry: &impl InstanceRegistry,
    raw: &str,
) -> Result<(InstanceName, PortPair)> {
    let name =
        InstanceName::parse(raw).map_err(|_| InstanceError::NotFound(raw.to_string()))?;
    match registry.lookup(&name)? {
        Some(ports) => Ok((name, ports)),
        None => Err(InstanceError::NotFound(raw.to_string()).into()),
    }
}
