//! Config file handling

use std::path::{Path, PathBuf};

use crate::errors::CurlbridgeError;

/// Log filter used when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// curlbridge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Generate multi-line commands by default
    pub multiline: bool,
    pub log_filter: String,
    /// Root of the file secret store
    pub secrets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = Self::default_config_dir();
        Self {
            secrets_dir: config_dir.join("secrets"),
            config_dir,
            multiline: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `<config_dir>/config.toml`
    pub fn load() -> Result<Self, CurlbridgeError> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load configuration from `config.toml` inside `config_dir`
    ///
    /// A missing file yields the defaults.
    pub fn load_from(config_dir: &Path) -> Result<Self, CurlbridgeError> {
        let config_file = config_dir.join("config.toml");
        let mut config = Self {
            secrets_dir: config_dir.join("secrets"),
            config_dir: config_dir.to_path_buf(),
            ..Self::default()
        };

        if !config_file.exists() {
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| CurlbridgeError::Config(format!("Failed to read config: {}", e)))?;
        let toml_value: toml::Value = toml::from_str(&content)
            .map_err(|e| CurlbridgeError::Config(format!("Invalid config TOML: {}", e)))?;

        let defaults = toml_value.get("defaults");
        if let Some(multiline) = defaults.and_then(|d| d.get("multiline")).and_then(|v| v.as_bool()) {
            config.multiline = multiline;
        }
        if let Some(filter) = defaults.and_then(|d| d.get("log_filter")).and_then(|v| v.as_str()) {
            config.log_filter = filter.to_string();
        }

        if let Some(dir) = toml_value
            .get("storage")
            .and_then(|s| s.get("secrets_dir"))
            .and_then(|v| v.as_str())
        {
            let path = PathBuf::from(dir);
            // Relative paths are relative to the config dir
            config.secrets_dir = if path.is_absolute() { path } else { config_dir.join(path) };
        }

        Ok(config)
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("curlbridge"))
            .unwrap_or_else(|| PathBuf::from(".curlbridge"))
    }
}
