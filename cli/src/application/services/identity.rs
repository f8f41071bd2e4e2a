//! Application service: caller identity precondition.

use anyhow::{Context, Result};

use crate::application::ports::IdentityProbe;
use crate::domain::InstanceError;

/// Fail unless the process runs as `expected`.
///
/// # Errors
///
/// Returns [`InstanceError::WrongIdentity`] on mismatch, or an error if the
/// current user cannot be resolved.
pub fn verify_identity(probe: &impl IdentityProbe, expected: &str) -> Result<()> {
    let actual = probe.current_user().context("resolving current user")?;
    if actual != expected {
        return Err(InstanceError::WrongIdentity {
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    tracing::debug!(user = %actual, "identity verified");
    Ok(())
}
