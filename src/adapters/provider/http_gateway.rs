//! HTTP implementation of the payment gateway port.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::GatewayConfig;
use crate::domain::Customer;
use crate::ports::{
    ConfirmationResult, CustomerCreationRequest, GatewayError, PaymentGateway,
    PaymentMethodUpdateRequest, SubscriptionRequest, SubscriptionResult, TrData,
};

use super::wire::{WireApiError, WireConfirmation, WireCustomer, WireSubscriptionResult, WireTrData};

/// Gateway client speaking the provider's merchant API.
///
/// One blocking-equivalent call per operation; failures pass through to the
/// caller unchanged. No retries happen here.
pub struct HttpGateway {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

impl HttpGateway {
    /// Create a new gateway client with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build a URL under this merchant's API root.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/merchants/{}/{}",
            self.config.base_url, self.config.merchant_id, path
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(
            &self.config.public_key,
            Some(self.config.private_key.expose_secret()),
        )
    }

    /// Triage a gateway response status before decoding the body.
    ///
    /// 404 maps to `NotFound` for `resource`; any other non-success status
    /// is surfaced as the provider's own error message and code.
    async fn check(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!(resource, "gateway reports no such record");
            return Err(GatewayError::not_found(resource));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let api_error: WireApiError = serde_json::from_str(&body).unwrap_or(WireApiError {
                message: None,
                code: None,
            });
            let message = api_error.message.unwrap_or(body);
            tracing::error!(%status, %message, "gateway rejected request");
            return Err(GatewayError::Provider {
                message,
                code: api_error.code,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_customer_data(
        &self,
        request: &CustomerCreationRequest,
    ) -> Result<TrData, GatewayError> {
        let response = self
            .authorized(
                self.http_client
                    .post(self.url("transparent_redirect/create_customer_data")),
            )
            .json(request)
            .send()
            .await?;

        let response = self.check(response, "transparent redirect data").await?;
        let wire: WireTrData = serde_json::from_slice(&response.bytes().await?)?;
        Ok(wire.into())
    }

    async fn update_payment_method_data(
        &self,
        request: &PaymentMethodUpdateRequest,
    ) -> Result<TrData, GatewayError> {
        let response = self
            .authorized(
                self.http_client
                    .post(self.url("transparent_redirect/update_payment_method_data")),
            )
            .json(request)
            .send()
            .await?;

        let response = self.check(response, "transparent redirect data").await?;
        let wire: WireTrData = serde_json::from_slice(&response.bytes().await?)?;
        Ok(wire.into())
    }

    async fn confirm(&self, query_string: &str) -> Result<ConfirmationResult, GatewayError> {
        // The query string is opaque to us; the gateway validates it.
        let response = self
            .authorized(
                self.http_client
                    .post(self.url("transparent_redirect/confirm")),
            )
            .form(&[("query_string", query_string)])
            .send()
            .await?;

        let response = self.check(response, "redirect confirmation").await?;
        let wire: WireConfirmation = serde_json::from_slice(&response.bytes().await?)?;
        wire.try_into()
    }

    async fn find_customer(&self, customer_id: &str) -> Result<Customer, GatewayError> {
        let response = self
            .authorized(
                self.http_client
                    .get(self.url(&format!("customers/{customer_id}"))),
            )
            .send()
            .await?;

        let response = self
            .check(response, &format!("customer {customer_id}"))
            .await?;
        let wire: WireCustomer = serde_json::from_slice(&response.bytes().await?)?;
        wire.try_into()
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionResult, GatewayError> {
        let response = self
            .authorized(self.http_client.post(self.url("subscriptions")))
            .json(request)
            .send()
            .await?;

        let response = self.check(response, "subscription").await?;
        let wire: WireSubscriptionResult = serde_json::from_slice(&response.bytes().await?)?;
        Ok(wire.into())
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionResult, GatewayError> {
        let response = self
            .authorized(
                self.http_client
                    .post(self.url(&format!("subscriptions/{subscription_id}/cancel"))),
            )
            .send()
            .await?;

        let response = self
            .check(response, &format!("subscription {subscription_id}"))
            .await?;
        let wire: WireSubscriptionResult = serde_json::from_slice(&response.bytes().await?)?;
        Ok(wire.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config() -> GatewayConfig {
        GatewayConfig {
            merchant_id: "merchant_abc".to_string(),
            public_key: "pub_key".to_string(),
            private_key: SecretString::new("priv_key".to_string()),
            base_url: "https://api.gateway.test".to_string(),
        }
    }

    #[test]
    fn urls_are_scoped_to_the_merchant() {
        let gateway = HttpGateway::new(test_config());
        assert_eq!(
            gateway.url("customers/cus_1"),
            "https://api.gateway.test/merchants/merchant_abc/customers/cus_1"
        );
        assert_eq!(
            gateway.url("transparent_redirect/confirm"),
            "https://api.gateway.test/merchants/merchant_abc/transparent_redirect/confirm"
        );
    }
}
