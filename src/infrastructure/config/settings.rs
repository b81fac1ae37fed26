//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the store path can be
//! overridden with the `SNIPERDB_DATABASE` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use sniperdb::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable that replaces `database.path`.
pub const DATABASE_PATH_ENV: &str = "SNIPERDB_DATABASE";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Store file configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(std::env::var(DATABASE_PATH_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path`, or fall back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be used.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize global logging from the `[logging]` section.
    ///
    /// Returns `false` if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        self.logging.init()
    }

    fn apply_overrides(&mut self, database_path: Option<String>) {
        if let Some(path) = database_path.filter(|p| !p.trim().is_empty()) {
            self.database.path = path;
        }
    }

    fn validate(&self) -> Result<()> {
        self.database.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
