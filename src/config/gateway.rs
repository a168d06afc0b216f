//! Payment gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Credentials and endpoint for the upstream payment gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant account identifier
    #[serde(default)]
    pub merchant_id: String,

    /// Public API key
    #[serde(default)]
    pub public_key: String,

    /// Private API key
    #[serde(default = "default_private_key")]
    pub private_key: SecretString,

    /// Base URL for the gateway API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_id.is_empty() {
            return Err(ValidationError::MissingRequired(
                "TRELLIS__GATEWAY__MERCHANT_ID",
            ));
        }
        if self.public_key.is_empty() {
            return Err(ValidationError::MissingRequired(
                "TRELLIS__GATEWAY__PUBLIC_KEY",
            ));
        }
        if self.private_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "TRELLIS__GATEWAY__PRIVATE_KEY",
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            merchant_id: String::new(),
            public_key: String::new(),
            private_key: default_private_key(),
            base_url: default_base_url(),
        }
    }
}

fn default_private_key() -> SecretString {
    SecretString::new(String::new())
}

fn default_base_url() -> String {
    "https://api.sandbox.gateway.example.com".to_string()
}
