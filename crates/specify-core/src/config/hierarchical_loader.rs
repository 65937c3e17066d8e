//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. User config (~/.specify/config.yaml)
//! 3. Environment variables (SPECIFY_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;
use tracing::debug;

/// File name of the user configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at the standard config directory (~/.specify)
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Home directory is not UTF-8: {:?}", p)))?;

        Ok(home.join(".specify"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = RuntimeConfig::default();

        let config_path = self.config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path);
            config = self.load_yaml_file(&config_path)?;
        }

        self.apply_env_overrides(config)
    }

    fn load_yaml_file(&self, path: &Utf8Path) -> Result<RuntimeConfig> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(RuntimeConfig::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Ok(val) = env::var("SPECIFY_HTTP_TIMEOUT_SECS") {
            config.network.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("SPECIFY_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("SPECIFY_DOWNLOAD_TIMEOUT_SECS") {
            config.network.download_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("SPECIFY_DOWNLOAD_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("SPECIFY_GITHUB_REPO_OWNER") {
            config.github.repo_owner = val;
        }

        if let Ok(val) = env::var("SPECIFY_GITHUB_REPO_NAME") {
            config.github.repo_name = val;
        }

        if let Ok(val) = env::var("SPECIFY_GITHUB_API_URL") {
            config.github.api_url = val.trim_end_matches('/').to_string();
        }

        if let Ok(val) = env::var("SPECIFY_INITIAL_COMMIT_MESSAGE") {
            config.git_workflow.initial_commit_message = val;
        }

        if let Ok(val) = env::var("SPECIFY_NO_COLOR") {
            config.display.color_enabled = !is_truthy(&val);
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

/// Any non-empty value other than `0` / `false` switches a flag on
fn is_truthy(val: &str) -> bool {
    let val = val.trim();
    !(val.is_empty() || val == "0" || val.eq_ignore_ascii_case("false"))
}
