//! # sift-config
//!
//! Layered configuration loading for Sift using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. `DATABASE_URL` (maps to `database.url`)
//! 2. Environment variables (`SIFT_*` prefix, `__` as separator)
//! 3. Project-level `.sift/config.toml`
//! 4. User-level `~/.config/sift/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIFT_DATABASE__AUTH_TOKEN` -> `database.auth_token`,
//! `SIFT_GENERAL__HISTOGRAM_BINS` -> `general.histogram_bins`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sift_config::SiftConfig;
//!
//! let config = SiftConfig::load_with_dotenv().expect("config");
//! if config.database.is_configured() {
//!     println!("store: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Name of the bare connection-string variable.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiftConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SiftConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` for malformed sources and
    /// `ConfigError::InvalidValue` for out-of-range settings.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// As [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// As [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.database.validate()?;
        config.general.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".sift/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::prefixed("SIFT_").split("__"))
            .merge(
                Env::raw()
                    .only(&[DATABASE_URL_VAR])
                    .map(|_| "database.url".into()),
            )
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sift").join("config.toml"))
    }
}
