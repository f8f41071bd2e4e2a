//! Loads manager configuration from the optional YAML file and the process
//! environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::{ConfigFile, ManagerConfig};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "OPENCLAW_MANAGER_CONFIG";

/// YAML config file on disk. A missing file means "no overrides".
pub struct YamlConfigSource;

impl YamlConfigSource {
    /// Location of the config file, if one can be determined.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(val));
        }
        dirs::config_dir().map(|dir| dir.join("openclaw-manager").join("config.yaml"))
    }

    /// Parse the config file, or return empty overrides when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_file(&self) -> Result<ConfigFile> {
        let Some(path) = self.path() else {
            return Ok(ConfigFile::default());
        };
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        let file = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(file)
    }

    /// Layer defaults, the config file, and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or any value is invalid.
    pub fn resolve(&self) -> Result<ManagerConfig> {
        ManagerConfig::resolve(|key| std::env::var(key).ok(), self.load_file()?, dirs::home_dir())
    }
}
