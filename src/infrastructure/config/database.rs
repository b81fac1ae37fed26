//! Store file configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Location and connection settings of the SQLite store file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file. Created on first open.
    pub path: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a writer waits for the file lock before giving up.
    pub busy_timeout_ms: u64,
    /// How long opening the file or checking out a connection may take.
    pub connect_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Configuration pointing at `path` with default pool settings.
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database.path" });
        }
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "users.db".into(),
            pool_size: 5,
            busy_timeout_ms: 5000,
            connect_timeout_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "users.db");
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_connect_timeout_is_rejected() {
        let config = DatabaseConfig {
            connect_timeout_ms: 0,
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "database.connect_timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let config = DatabaseConfig {
            pool_size: 0,
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                ..
            })
        ));
    }

    #[test]
    fn blank_path_is_rejected() {
        let config = DatabaseConfig::with_path("  ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
    }
}
