//! Infrastructure implementation of the `IdentityProbe` port.

use anyhow::{Context, Result};
use nix::unistd::{Uid, User};

use crate::application::ports::IdentityProbe;

/// Looks the effective uid up in the system user database.
pub struct SystemIdentity;

impl IdentityProbe for SystemIdentity {
    fn current_user(&self) -> Result<String> {
        let uid = Uid::effective();
        let user = User::from_uid(uid)
            .with_context(|| format!("looking up uid {uid}"))?
            .ok_or_else(|| anyhow::anyhow!("no user database entry for uid {uid}"))?;
        Ok(user.name)
    }
}
