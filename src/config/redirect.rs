//! Transparent-redirect URL configuration
//!
//! The gateway posts its confirmation back to an address on our side. That
//! address depends on where the application runs: local development and test
//! use a fixed localhost address, every other environment requires an
//! externally reachable application address. The choice is resolved once at
//! startup and injected into the billing components; nothing reads the
//! process environment at call time.

use serde::Deserialize;

use super::error::ValidationError;
use super::AppConfig;

/// Fixed redirect base used in development and test.
const LOCAL_BASE_URL: &str = "http://localhost:3000";

/// Path the gateway redirects to after customer creation.
pub const RECEIVE_PATH: &str = "/receive";

/// Path the gateway redirects to after a payment method update.
pub const RENEW_PATH: &str = "/renew";

/// Application environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Environments that fall back to the localhost redirect address.
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// Resolved redirect URLs, ready to hand to the billing components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectConfig {
    base_url: String,
}

impl RedirectConfig {
    /// Resolve the redirect base URL from the loaded configuration.
    ///
    /// Outside development and test an application address is mandatory;
    /// a missing one is a startup failure, not a request-time one.
    pub fn resolve(config: &AppConfig) -> Result<Self, ValidationError> {
        let base_url = if config.environment.is_local() {
            LOCAL_BASE_URL.to_string()
        } else {
            let address = config
                .app_address
                .as_deref()
                .filter(|a| !a.is_empty())
                .ok_or(ValidationError::MissingRequired("TRELLIS__APP_ADDRESS"))?;

            if !address.starts_with("http://") && !address.starts_with("https://") {
                return Err(ValidationError::InvalidAppAddress);
            }

            address.trim_end_matches('/').to_string()
        };

        Ok(Self { base_url })
    }

    /// Build from a known base URL, bypassing environment resolution.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Redirect URL for the new-customer flow.
    pub fn receive_url(&self) -> String {
        format!("{}{}", self.base_url, RECEIVE_PATH)
    }

    /// Redirect URL for the payment-method update flow.
    pub fn renew_url(&self) -> String {
        format!("{}{}", self.base_url, RENEW_PATH)
    }
}
