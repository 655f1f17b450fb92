//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DETOX_DIAL` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a runnable
//! development configuration backed by in-memory stores.
//!
//! # Example
//!
//! ```no_run
//! use detox_dial::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod intervention;
mod redis;
mod scoring;
mod server;
mod telephony;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use intervention::InterventionConfig;
pub use redis::RedisConfig;
pub use scoring::ScoringConfig;
pub use server::{Environment, ServerConfig};
pub use telephony::TelephonyConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Profile storage (PostgreSQL); in-memory when unset
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Intervention guard storage (Redis); in-memory when unset
    #[serde(default)]
    pub redis: RedisConfig,

    /// Outbound call provider (Twilio)
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Callback URL, signing and deduplication settings
    #[serde(default)]
    pub intervention: InterventionConfig,

    /// Survey scoring policy
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DETOX_DIAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DETOX_DIAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DETOX_DIAL__TELEPHONY__ACCOUNT_SID=AC...` -> `telephony.account_sid = AC...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DETOX_DIAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or if
    /// production is missing a real telephony provider.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.telephony.validate()?;
        self.intervention.validate(self.is_production())?;
        if self.is_production() && !self.telephony.is_configured() {
            return Err(ValidationError::TelephonyRequiredInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
