//! Instance identity, path derivation, and state derivation.
//!
//! Pure functions only. The reserved `default` instance is resolved into
//! [`InstanceName::Default`] here, once, so no caller compares against the
//! string `"default"` again.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

pub use openclaw_common::InstanceState;

use crate::domain::error::InstanceError;

/// Registry name of the pre-existing, unqualified-path instance.
pub const DEFAULT_INSTANCE: &str = "default";

/// Service name (and path stem) shared by every instance.
pub const SERVICE_PREFIX: &str = "openclaw";

/// Lowercase alphanumeric with interior hyphens; checked before any
/// name is interpolated into a path or unit name.
pub static INSTANCE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern; cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").expect("valid regex")
});

/// A resolved instance name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceName {
    /// The legacy instance living at unqualified paths.
    Default,
    /// Any other instance; the string always matches [`INSTANCE_NAME_RE`].
    Named(String),
}

impl InstanceName {
    /// Resolve a name that refers to an instance, including `default`.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::InvalidName`] if `raw` is neither `default`
    /// nor a valid instance name.
    pub fn parse(raw: &str) -> Result<Self, InstanceError> {
        if raw == DEFAULT_INSTANCE {
            return Ok(Self::Default);
        }
        if is_valid_instance_name(raw) {
            Ok(Self::Named(raw.to_string()))
        } else {
            Err(InstanceError::InvalidName(raw.to_string()))
        }
    }

    /// Registry key for this instance.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => DEFAULT_INSTANCE,
            Self::Named(name) => name,
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl std::fmt::Display for InstanceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `name` is usable as a new instance name.
///
/// Valid names match `^[a-z0-9]([a-z0-9-]*[a-z0-9])?$`. `default` matches the
/// pattern but is reserved, so it is rejected here.
#[must_use]
pub fn is_valid_instance_name(name: &str) -> bool {
    name != DEFAULT_INSTANCE && INSTANCE_NAME_RE.is_match(name)
}

/// Roots that every derived path hangs off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub home: PathBuf,
    pub quadlet_dir: PathBuf,
}

/// Paths and unit name derived from an instance name. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePaths {
    pub state_dir: PathBuf,
    pub workspace_dir: PathBuf,
    pub service_name: String,
    pub unit_file: PathBuf,
}

impl InstancePaths {
    /// Rendered gateway config inside the state directory.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.state_dir.join(CONFIG_FILE_NAME)
    }

    /// Environment file holding the gateway token.
    #[must_use]
    pub fn env_file(&self) -> PathBuf {
        self.state_dir.join(ENV_FILE_NAME)
    }

    /// The quadlet names the container after the service.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.service_name
    }
}

/// File name of the rendered gateway config.
pub const CONFIG_FILE_NAME: &str = "openclaw.json";

/// File name of the per-instance environment file.
pub const ENV_FILE_NAME: &str = ".env";

/// Derive every path for `name`. Total and side-effect free.
#[must_use]
pub fn derive_paths(layout: &PathLayout, name: &InstanceName) -> InstancePaths {
    let (state, workspace, service) = match name {
        InstanceName::Default => (
            format!(".{SERVICE_PREFIX}"),
            "workspace".to_string(),
            SERVICE_PREFIX.to_string(),
        ),
        InstanceName::Named(n) => (
            format!(".{SERVICE_PREFIX}-{n}"),
            format!("workspace-{n}"),
            format!("{SERVICE_PREFIX}-{n}"),
        ),
    };
    InstancePaths {
        state_dir: layout.home.join(state),
        workspace_dir: layout.home.join(workspace),
        unit_file: unit_file_path(&layout.quadlet_dir, &service),
        service_name: service,
    }
}

fn unit_file_path(quadlet_dir: &Path, service_name: &str) -> PathBuf {
    quadlet_dir.join(format!("{service_name}.container"))
}

/// Derive instance state from the two service-manager queries.
///
/// Active wins over failed; anything else is stopped.
#[must_use]
pub fn derive_state(active: bool, failed: bool) -> InstanceState {
    if active {
        InstanceState::Running
    } else if failed {
        InstanceState::Failed
    } else {
        InstanceState::Stopped
    }
}
