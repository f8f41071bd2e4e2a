//! Manager configuration: schema, defaults, and layering.
//!
//! Pure functions only; no I/O, no async, no filesystem access. The
//! environment is passed in as a lookup closure so resolution is testable
//! without touching the process environment.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::instance::PathLayout;
use crate::domain::template::{TemplateField, TemplateValues};

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_SERVICE_USER: &str = "openclaw";
pub const DEFAULT_GATEWAY_PORT: u16 = 18789;
pub const DEFAULT_BRIDGE_PORT: u16 = 18790;
pub const DEFAULT_MEMORY: &str = "4g";
pub const DEFAULT_CPUS: &str = "2";
pub const DEFAULT_DNS_PRIMARY: &str = "1.1.1.1";
pub const DEFAULT_DNS_FALLBACK: &str = "9.9.9.9";
pub const DEFAULT_IMAGE: &str = "localhost/openclaw:latest";
pub const DEFAULT_USER_MAPPING: &str = "keep-id";

// ── Config file schema ───────────────────────────────────────────────────────

/// Optional YAML overrides, e.g. `~/.config/openclaw-manager/config.yaml`.
///
/// Every field is optional; environment variables win over the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub service_user: Option<String>,
    pub home: Option<PathBuf>,
    pub gateway_port: Option<u16>,
    pub bridge_port: Option<u16>,
    pub memory: Option<String>,
    pub cpus: Option<String>,
    pub dns_primary: Option<String>,
    pub dns_fallback: Option<String>,
    pub image: Option<String>,
    pub user_mapping: Option<String>,
    pub quadlet_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub registry: Option<PathBuf>,
    pub shared_skills_dir: Option<PathBuf>,
}

// ── Resolved config ──────────────────────────────────────────────────────────

/// Fully resolved configuration, read once at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub service_user: String,
    pub home: PathBuf,
    pub default_gateway_port: u16,
    pub default_bridge_port: u16,
    pub memory: String,
    pub cpus: String,
    pub dns_primary: String,
    pub dns_fallback: String,
    pub image: String,
    pub user_mapping: String,
    pub quadlet_dir: PathBuf,
    pub template_dir: PathBuf,
    pub registry_path: PathBuf,
    pub shared_skills_dir: PathBuf,
}

impl ManagerConfig {
    /// Layer defaults, then `file`, then environment variables.
    ///
    /// `fallback_home` is used only when neither `OPENCLAW_HOME` nor the file
    /// names a home directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unparsable port, a default bridge port
    /// that is not gateway + 1, or when no home directory can be determined.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
        fallback_home: Option<PathBuf>,
    ) -> Result<Self> {
        let text = |key: &str, from_file: Option<String>, default: &str| {
            env(key).or(from_file).unwrap_or_else(|| default.to_string())
        };

        let home = env("OPENCLAW_HOME")
            .map(PathBuf::from)
            .or(file.home)
            .or(fallback_home)
            .ok_or(ConfigError::NoHome)?;

        let default_gateway_port =
            port(&env, "OPENCLAW_GATEWAY_PORT", file.gateway_port, DEFAULT_GATEWAY_PORT)?;
        let default_bridge_port =
            port(&env, "OPENCLAW_BRIDGE_PORT", file.bridge_port, DEFAULT_BRIDGE_PORT)?;
        if default_gateway_port.checked_add(1) != Some(default_bridge_port) {
            return Err(ConfigError::InvalidValue {
                key: "OPENCLAW_BRIDGE_PORT",
                value: default_bridge_port.to_string(),
                reason: format!("must be gateway port + 1 ({default_gateway_port} + 1)"),
            }
            .into());
        }

        let path = |key: &str, from_file: Option<PathBuf>, default: PathBuf| {
            env(key).map(PathBuf::from).or(from_file).unwrap_or(default)
        };

        Ok(Self {
            service_user: text("OPENCLAW_USER", file.service_user, DEFAULT_SERVICE_USER),
            default_gateway_port,
            default_bridge_port,
            memory: text("OPENCLAW_MEMORY", file.memory, DEFAULT_MEMORY),
            cpus: text("OPENCLAW_CPUS", file.cpus, DEFAULT_CPUS),
            dns_primary: text("OPENCLAW_DNS_PRIMARY", file.dns_primary, DEFAULT_DNS_PRIMARY),
            dns_fallback: text("OPENCLAW_DNS_FALLBACK", file.dns_fallback, DEFAULT_DNS_FALLBACK),
            image: text("OPENCLAW_IMAGE", file.image, DEFAULT_IMAGE),
            user_mapping: text("OPENCLAW_USER_MAPPING", file.user_mapping, DEFAULT_USER_MAPPING),
            quadlet_dir: path(
                "OPENCLAW_QUADLET_DIR",
                file.quadlet_dir,
                home.join(".config").join("containers").join("systemd"),
            ),
            template_dir: path(
                "OPENCLAW_TEMPLATE_DIR",
                file.template_dir,
                home.join(".config").join("openclaw-manager").join("templates"),
            ),
            registry_path: path("OPENCLAW_REGISTRY", file.registry, home.join(".openclaw-ports")),
            shared_skills_dir: path(
                "OPENCLAW_SHARED_SKILLS",
                file.shared_skills_dir,
                home.join("shared-skills"),
            ),
            home,
        })
    }

    /// Roots used for path derivation.
    #[must_use]
    pub fn layout(&self) -> PathLayout {
        PathLayout {
            home: self.home.clone(),
            quadlet_dir: self.quadlet_dir.clone(),
        }
    }

    /// Template values that do not depend on the instance.
    #[must_use]
    pub fn base_template_values(&self) -> TemplateValues {
        TemplateValues::new()
            .with(TemplateField::DnsPrimary, &self.dns_primary)
            .with(TemplateField::DnsFallback, &self.dns_fallback)
            .with(TemplateField::Memory, &self.memory)
            .with(TemplateField::Cpus, &self.cpus)
            .with(TemplateField::Image, &self.image)
            .with(TemplateField::UserMapping, &self.user_mapping)
            .with(TemplateField::OpenclawHome, self.home.to_string_lossy())
            .with(
                TemplateField::SharedSkillsDir,
                self.shared_skills_dir.to_string_lossy(),
            )
    }
}

fn port(
    env: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    from_file: Option<u16>,
    default: u16,
) -> Result<u16, ConfigError> {
    match env(key) {
        Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(from_file.unwrap_or(default)),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
