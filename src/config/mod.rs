//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `TRELLIS_` prefix
//! and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use trellis::config::{AppConfig, RedirectConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! let redirect = RedirectConfig::resolve(&config).expect("Missing app address");
//! ```

mod error;
mod gateway;
mod redirect;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use redirect::{Environment, RedirectConfig, RECEIVE_PATH, RENEW_PATH};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Execution environment (development, test, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Externally reachable base URL of the application, required outside
    /// development and test
    #[serde(default)]
    pub app_address: Option<String>,

    /// Payment gateway credentials and endpoint
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `TRELLIS` prefix, `__` separating nested values:
    ///
    /// - `TRELLIS__ENVIRONMENT=production`
    /// - `TRELLIS__APP_ADDRESS=https://app.example.com`
    /// - `TRELLIS__GATEWAY__MERCHANT_ID=...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRELLIS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Checks gateway credentials and, outside development/test, that the
    /// application address is present and well formed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        RedirectConfig::resolve(self)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TRELLIS__GATEWAY__MERCHANT_ID", "merchant_abc");
        env::set_var("TRELLIS__GATEWAY__PUBLIC_KEY", "pub_key");
        env::set_var("TRELLIS__GATEWAY__PRIVATE_KEY", "priv_key");
    }

    fn clear_env() {
        env::remove_var("TRELLIS__GATEWAY__MERCHANT_ID");
        env::remove_var("TRELLIS__GATEWAY__PUBLIC_KEY");
        env::remove_var("TRELLIS__GATEWAY__PRIVATE_KEY");
        env::remove_var("TRELLIS__ENVIRONMENT");
        env::remove_var("TRELLIS__APP_ADDRESS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.gateway.merchant_id, "merchant_abc");
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_validate_development_without_app_address() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_production_requires_app_address() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRELLIS__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_production_with_app_address() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRELLIS__ENVIRONMENT", "production");
        env::set_var("TRELLIS__APP_ADDRESS", "https://app.example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }
}
