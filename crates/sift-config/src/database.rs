//! Dataset store connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_retry_attempts() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection string: a file path, `:memory:`, or a `libsql://` /
    /// `https://` URL. Also read from `DATABASE_URL`.
    #[serde(default)]
    pub url: String,

    /// Auth token for remote stores.
    #[serde(default)]
    pub auth_token: String,

    /// Refuse plaintext remote connections (`http://`, `ws://`).
    #[serde(default)]
    pub require_tls: bool,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Total connection attempts before the store is declared unavailable.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed pause between attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            require_tls: false,
            connect_timeout_secs: default_connect_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Settings for `url` with every other field at its default.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// The connection string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDatabaseUrl` when it is empty.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(self.url.trim())
        } else {
            Err(ConfigError::MissingDatabaseUrl)
        }
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.retry_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.connect_timeout_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DatabaseConfig::default();
        assert!(!config.is_configured());
        assert!(!config.require_tls);
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn missing_url_is_an_error() {
        assert!(matches!(
            DatabaseConfig::default().require_url(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
        assert!(matches!(
            DatabaseConfig::with_url("   ").require_url(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn zero_attempts_is_invalid() {
        let config = DatabaseConfig {
            retry_attempts: 0,
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "database.retry_attempts"
        ));
    }
}
