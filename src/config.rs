//! Configuration types for the memefinder service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use meme_search::SearchConfig;

use crate::error::{AppError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MEMEFINDER_CONFIG";

/// Top-level configuration for the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Sources, selectors, limits and normalisation resources.
    pub search: SearchConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind. `0` picks a free port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config named by `MEMEFINDER_CONFIG`, else the default path.
    ///
    /// An explicitly named file must exist. A missing default file means
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&explicit));
        }
        let path = Self::default_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns the default config file path: `~/.config/memefinder/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("memefinder").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("memefinder")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/memefinder-config/config.toml")
        }
    }
}
