use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::query_log::QueryLogConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "querylog.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/querylog/config.toml";

/// Main configuration structure for the query log console
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Control API endpoint
    #[serde(default)]
    pub server: ServerConfig,

    /// Query log table settings
    #[serde(default)]
    pub query_log: QueryLogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. querylog.toml in current directory
    /// 3. /etc/querylog/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.or_else(|| Self::get_config_path()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(path, &contents)
    }

    fn from_toml(path: &str, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.server_url {
            self.server.url = url;
        }
        if let Some(page_size) = overrides.page_size {
            self.query_log.page_size = page_size;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query_log.page_size == 0 {
            return Err(ConfigError::Validation(
                "query_log.page_size must be greater than 0".to_string(),
            ));
        }

        let url = self.server.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "server.url must be an http(s) URL, got '{}'",
                self.server.url
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty".to_string(),
            ));
        }

        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.timeout_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<&'static str> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| Path::new(path).exists())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub page_size: Option<u32>,
    pub log_level: Option<String>,
}
