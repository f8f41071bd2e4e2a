use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live state of an instance's service unit.
///
/// Only three states are recognised: anything the service manager reports
/// that is neither active nor failed is `Stopped`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Running,
    Failed,
    #[default]
    Stopped,
}

impl InstanceState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InstanceState::Running => "running",
            InstanceState::Failed => "failed",
            InstanceState::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `list` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceSummary {
    pub name: String,
    pub gateway_port: u16,
    pub bridge_port: u16,
    pub service: String,
    pub state: InstanceState,
}

/// Full `list` output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListOutput {
    pub instances: Vec<InstanceSummary>,
}

/// Container runtime fields reported by the container engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerRuntime {
    pub id: String,
    pub image: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Full `status` output for one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub name: String,
    pub service: String,
    pub state: InstanceState,
    pub gateway_port: u16,
    pub bridge_port: u16,
    pub state_dir: String,
    pub workspace_dir: String,
    pub unit_file: String,
    /// Present only when the container exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerRuntime>,
}
