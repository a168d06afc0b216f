//! Transparent-redirect flows.
//!
//! Builds the request payloads for the gateway's two provider-hosted form
//! flows (new customer, payment method update) and wraps the gateway's
//! confirmation result with convenience accessors.

use std::ops::Deref;
use std::sync::Arc;

use crate::config::RedirectConfig;
use crate::domain::{newest_payment_method, Customer, PaymentMethod, Plan, PLAN_CUSTOM_FIELD};
use crate::ports::{
    ConfirmationResult, CustomerCreationRequest, GatewayError, PaymentGateway,
    PaymentMethodUpdateRequest, TrData,
};

/// Entry point for the transparent-redirect flows.
pub struct TransparentRedirect {
    gateway: Arc<dyn PaymentGateway>,
    redirect: RedirectConfig,
}

impl TransparentRedirect {
    pub fn new(gateway: Arc<dyn PaymentGateway>, redirect: RedirectConfig) -> Self {
        Self { gateway, redirect }
    }

    /// Payload for creating a customer through the provider-hosted form.
    pub fn customer_creation_request(&self, email: &str) -> CustomerCreationRequest {
        CustomerCreationRequest {
            customer: crate::ports::CustomerParams {
                email: email.to_string(),
                custom_fields: Default::default(),
            },
            redirect_url: self.redirect.receive_url(),
        }
    }

    /// Same payload with the plan name carried as a custom field.
    pub fn customer_creation_request_with_plan(
        &self,
        email: &str,
        plan: &Plan,
    ) -> CustomerCreationRequest {
        let mut request = self.customer_creation_request(email);
        request
            .customer
            .custom_fields
            .insert(PLAN_CUSTOM_FIELD.to_string(), plan.name.clone());
        request
    }

    /// Payload for updating a stored payment method.
    pub fn payment_method_update_request(
        &self,
        payment_method_token: &str,
    ) -> PaymentMethodUpdateRequest {
        PaymentMethodUpdateRequest {
            payment_method_token: payment_method_token.to_string(),
            redirect_url: self.redirect.renew_url(),
        }
    }

    /// Ask the gateway for transparent-redirect data for customer creation.
    pub async fn create_customer_data(
        &self,
        request: &CustomerCreationRequest,
    ) -> Result<TrData, GatewayError> {
        self.gateway.create_customer_data(request).await
    }

    /// Ask the gateway for transparent-redirect data for a payment method
    /// update.
    pub async fn update_payment_method_data(
        &self,
        request: &PaymentMethodUpdateRequest,
    ) -> Result<TrData, GatewayError> {
        self.gateway.update_payment_method_data(request).await
    }

    /// Submit the gateway's confirmation query string and wrap the result.
    pub async fn confirm(&self, query_string: &str) -> Result<RedirectConfirmation, GatewayError> {
        let result = self.gateway.confirm(query_string).await?;
        Ok(RedirectConfirmation::new(result))
    }
}

/// A confirmed transparent-redirect submission.
///
/// Dereferences to the wrapped [`ConfirmationResult`], so every field of the
/// gateway's result stays reachable exactly as on the result itself.
#[derive(Debug, Clone)]
pub struct RedirectConfirmation {
    result: ConfirmationResult,
}

impl RedirectConfirmation {
    pub fn new(result: ConfirmationResult) -> Self {
        Self { result }
    }

    /// The confirmed customer, when the flow produced one.
    pub fn customer(&self) -> Option<&Customer> {
        self.result.customer.as_ref()
    }

    /// The customer's payment method with the maximum `updated_at`.
    pub fn newest_payment_method(&self) -> Option<&PaymentMethod> {
        self.customer()
            .and_then(|c| newest_payment_method(&c.payment_methods))
    }

    /// Plan named by the `plan` custom field on the confirmation's customer.
    pub fn plan(&self) -> Option<Plan> {
        self.customer()
            .and_then(|c| c.custom_fields.get(PLAN_CUSTOM_FIELD))
            .map(Plan::new)
    }

    /// Token of the newest payment method.
    pub fn token(&self) -> Option<&str> {
        self.newest_payment_method().map(|pm| pm.token.as_str())
    }

    /// True iff the confirmation succeeded and the customer holds at least
    /// one payment method.
    pub fn has_payment_method(&self) -> bool {
        self.result.success
            && self
                .customer()
                .is_some_and(|c| !c.payment_methods.is_empty())
    }

    pub fn into_inner(self) -> ConfirmationResult {
        self.result
    }
}

impl Deref for RedirectConfirmation {
    type Target = ConfirmationResult;

    fn deref(&self) -> &Self::Target {
        &self.result
    }
}
