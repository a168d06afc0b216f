//! Mock payment gateway for testing.
//!
//! Configurable implementation of `PaymentGateway` for unit and integration
//! tests. Supports pre-configured responses, error injection, and call
//! tracking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::Customer;
use crate::ports::{
    ConfirmationResult, CustomerCreationRequest, GatewayError, PaymentGateway,
    PaymentMethodUpdateRequest, SubscriptionRequest, SubscriptionResult, TrData,
};

/// Mock gateway for tests.
///
/// # Example
///
/// ```ignore
/// let mock = MockGateway::new();
/// mock.set_customer(customer);
/// mock.set_confirmation(ConfirmationResult { success: true, .. });
///
/// let view = Customers::new(Arc::new(mock)).find("cus_1").await?;
/// ```
#[derive(Default)]
pub struct MockGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Customers the mock knows, by ID; everything else is not found.
    customers: HashMap<String, Customer>,

    /// Confirmation returned from `confirm`.
    next_confirmation: Option<ConfirmationResult>,

    /// Result returned from subscription create/cancel.
    next_subscription_result: Option<SubscriptionResult>,

    /// Error to return on the next call, whichever operation runs.
    next_error: Option<GatewayError>,

    /// Recorded calls for assertions.
    call_log: Vec<RecordedCall>,
}

/// Recorded gateway call for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub argument: String,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer the mock will return from `find_customer`.
    pub fn set_customer(&self, customer: Customer) {
        let mut state = self.inner.lock().unwrap();
        state.customers.insert(customer.id.clone(), customer);
    }

    /// Set the result of the next `confirm` call.
    pub fn set_confirmation(&self, confirmation: ConfirmationResult) {
        self.inner.lock().unwrap().next_confirmation = Some(confirmation);
    }

    /// Set the result of the next subscription create/cancel call.
    pub fn set_subscription_result(&self, result: SubscriptionResult) {
        self.inner.lock().unwrap().next_subscription_result = Some(result);
    }

    /// Fail the next call with `error`.
    pub fn set_error(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    fn record(&self, method: &str, argument: impl Into<String>) -> Result<(), GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(RecordedCall {
            method: method.to_string(),
            argument: argument.into(),
        });
        match state.next_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_customer_data(
        &self,
        request: &CustomerCreationRequest,
    ) -> Result<TrData, GatewayError> {
        self.record("create_customer_data", &request.customer.email)?;
        Ok(TrData(format!("tr_data_create_{}", request.customer.email)))
    }

    async fn update_payment_method_data(
        &self,
        request: &PaymentMethodUpdateRequest,
    ) -> Result<TrData, GatewayError> {
        self.record("update_payment_method_data", &request.payment_method_token)?;
        Ok(TrData(format!(
            "tr_data_update_{}",
            request.payment_method_token
        )))
    }

    async fn confirm(&self, query_string: &str) -> Result<ConfirmationResult, GatewayError> {
        self.record("confirm", query_string)?;
        self.inner
            .lock()
            .unwrap()
            .next_confirmation
            .clone()
            .ok_or_else(|| GatewayError::provider("mock: no confirmation configured"))
    }

    async fn find_customer(&self, customer_id: &str) -> Result<Customer, GatewayError> {
        self.record("find_customer", customer_id)?;
        self.inner
            .lock()
            .unwrap()
            .customers
            .get(customer_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("customer {customer_id}")))
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionResult, GatewayError> {
        self.record("create_subscription", &request.plan_id)?;
        self.inner
            .lock()
            .unwrap()
            .next_subscription_result
            .clone()
            .ok_or_else(|| GatewayError::provider("mock: no subscription result configured"))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<SubscriptionResult, GatewayError> {
        self.record("cancel_subscription", subscription_id)?;
        self.inner
            .lock()
            .unwrap()
            .next_subscription_result
            .clone()
            .ok_or_else(|| GatewayError::provider("mock: no subscription result configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let mock = MockGateway::new();
        let err = mock.find_customer("nope").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound { .. }));
    }

    #[tokio::test]
    async fn injected_error_fires_once() {
        let mock = MockGateway::new();
        mock.set_error(GatewayError::provider("boom"));

        assert!(mock.confirm("qs").await.is_err());

        mock.set_confirmation(ConfirmationResult {
            success: true,
            message: None,
            customer: None,
        });
        assert!(mock.confirm("qs").await.is_ok());
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let mock = MockGateway::new();
        let _ = mock.find_customer("cus_1").await;
        assert_eq!(
            mock.calls(),
            vec![RecordedCall {
                method: "find_customer".to_string(),
                argument: "cus_1".to_string(),
            }]
        );
    }
}
