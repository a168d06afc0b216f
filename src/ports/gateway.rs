//! Payment gateway port.
//!
//! Contract for the upstream payment provider: transparent-redirect data
//! generation and confirmation, customer lookup, and subscription
//! create/cancel. Every operation performs at most one provider call; this
//! layer never retries and never recovers locally.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Customer, Subscription};

/// Port for the upstream payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Generate transparent-redirect data for creating a customer.
    async fn create_customer_data(
        &self,
        request: &CustomerCreationRequest,
    ) -> Result<TrData, GatewayError>;

    /// Generate transparent-redirect data for updating a stored payment
    /// method.
    async fn update_payment_method_data(
        &self,
        request: &PaymentMethodUpdateRequest,
    ) -> Result<TrData, GatewayError>;

    /// Submit the opaque query string the gateway appended to our redirect
    /// and receive the confirmed result.
    async fn confirm(&self, query_string: &str) -> Result<ConfirmationResult, GatewayError>;

    /// Fetch a customer record by gateway ID.
    ///
    /// A customer the gateway does not know yields [`GatewayError::NotFound`].
    async fn find_customer(&self, customer_id: &str) -> Result<Customer, GatewayError>;

    /// Create a subscription; the request is forwarded verbatim.
    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionResult, GatewayError>;

    /// Cancel a subscription by gateway ID.
    async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionResult, GatewayError>;
}

/// Opaque transparent-redirect data blob, embedded in the provider-hosted
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrData(pub String);

impl TrData {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Payload for the new-customer transparent-redirect flow.
///
/// Wire shape: `{ customer: { email [, custom_fields] }, redirect_url }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreationRequest {
    pub customer: CustomerParams,
    pub redirect_url: String,
}

/// Customer fields submitted on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerParams {
    pub email: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

/// Payload for the payment-method update transparent-redirect flow.
///
/// Wire shape: `{ payment_method_token, redirect_url }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodUpdateRequest {
    pub payment_method_token: String,
    pub redirect_url: String,
}

/// Options for creating a subscription, forwarded to the gateway verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub payment_method_token: String,
    pub plan_id: String,

    /// Any additional provider options, passed through untouched.
    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
}

impl SubscriptionRequest {
    pub fn new(payment_method_token: impl Into<String>, plan_id: impl Into<String>) -> Self {
        Self {
            payment_method_token: payment_method_token.into(),
            plan_id: plan_id.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Result of confirming a transparent-redirect submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationResult {
    /// Whether the gateway accepted the submission.
    pub success: bool,

    /// Gateway message accompanying a rejection.
    #[serde(default)]
    pub message: Option<String>,

    /// The confirmed customer, when the flow produced one.
    #[serde(default)]
    pub customer: Option<Customer>,
}

/// Result of a subscription create/cancel call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResult {
    /// Whether the gateway accepted the operation.
    pub success: bool,

    /// Gateway message accompanying a rejection.
    #[serde(default)]
    pub message: Option<String>,

    /// The affected subscription, when the gateway returned one.
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

/// Errors from gateway operations.
///
/// Provider and transport failures are surfaced unmodified; no recovery
/// happens in this layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway reports no such record.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The gateway rejected the request (validation, authentication, or any
    /// other provider-reported failure).
    #[error("gateway error: {message}")]
    Provider {
        message: String,
        /// Provider error code, when one was supplied.
        code: Option<String>,
    },

    /// Network-level failure reaching the gateway.
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a body this crate cannot decode.
    #[error("could not decode gateway response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

impl GatewayError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        GatewayError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        GatewayError::Provider {
            message: message.into(),
            code: None,
        }
    }

    pub fn provider_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        GatewayError::Provider {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_creation_payload_is_exactly_email_and_redirect_url() {
        let request = CustomerCreationRequest {
            customer: CustomerParams {
                email: "joe@example.com".to_string(),
                custom_fields: BTreeMap::new(),
            },
            redirect_url: "http://localhost:3000/receive".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "customer": { "email": "joe@example.com" },
                "redirect_url": "http://localhost:3000/receive"
            })
        );
    }

    #[test]
    fn customer_creation_payload_carries_custom_fields_when_present() {
        let mut custom_fields = BTreeMap::new();
        custom_fields.insert("plan".to_string(), "yearly".to_string());
        let request = CustomerCreationRequest {
            customer: CustomerParams {
                email: "joe@example.com".to_string(),
                custom_fields,
            },
            redirect_url: "http://localhost:3000/receive".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "customer": {
                    "email": "joe@example.com",
                    "custom_fields": { "plan": "yearly" }
                },
                "redirect_url": "http://localhost:3000/receive"
            })
        );
    }

    #[test]
    fn subscription_request_forwards_extra_options_verbatim() {
        let request = SubscriptionRequest::new("tok_abc", "monthly")
            .with_option("trial_duration", "14")
            .with_option("trial_duration_unit", "day");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "payment_method_token": "tok_abc",
                "plan_id": "monthly",
                "trial_duration": "14",
                "trial_duration_unit": "day"
            })
        );
    }

    #[test]
    fn not_found_error_names_the_resource() {
        let err = GatewayError::not_found("customer cus_123");
        assert_eq!(err.to_string(), "customer cus_123 not found");
    }
}
