//! Subscription create/cancel pass-throughs.

use std::ops::Deref;
use std::sync::Arc;

use crate::domain::Subscription;
use crate::ports::{GatewayError, PaymentGateway, SubscriptionRequest, SubscriptionResult};

/// Subscription operations against the gateway.
pub struct Subscriptions {
    gateway: Arc<dyn PaymentGateway>,
}

impl Subscriptions {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Create a subscription; the request is forwarded verbatim.
    pub async fn create(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionView, GatewayError> {
        let result = self.gateway.create_subscription(request).await?;
        Ok(SubscriptionView::new(result))
    }

    /// Cancel a subscription by gateway ID.
    pub async fn cancel(&self, subscription_id: &str) -> Result<SubscriptionView, GatewayError> {
        let result = self.gateway.cancel_subscription(subscription_id).await?;
        Ok(SubscriptionView::new(result))
    }
}

/// Wrapped result of a subscription create/cancel call.
///
/// Dereferences to the wrapped [`SubscriptionResult`].
#[derive(Debug, Clone)]
pub struct SubscriptionView {
    result: SubscriptionResult,
}

impl SubscriptionView {
    pub fn new(result: SubscriptionResult) -> Self {
        Self { result }
    }

    pub fn success(&self) -> bool {
        self.result.success
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.result.subscription.as_ref()
    }

    pub fn into_inner(self) -> SubscriptionResult {
        self.result
    }
}

impl Deref for SubscriptionView {
    type Target = SubscriptionResult;

    fn deref(&self) -> &Self::Target {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::provider::MockGateway;
    use crate::domain::SubscriptionStatus;

    fn accepted(subscription: Option<Subscription>) -> SubscriptionResult {
        SubscriptionResult {
            success: true,
            message: None,
            subscription,
        }
    }

    fn active_subscription(id: &str) -> Subscription {
        Subscription {
            id: id.to_string(),
            plan_id: "monthly".to_string(),
            status: SubscriptionStatus::Active,
            first_billing_date: None,
            next_billing_date: None,
            billing_period_start_date: None,
            billing_period_end_date: None,
            next_billing_period_amount: None,
        }
    }

    #[tokio::test]
    async fn create_forwards_the_request_and_wraps_the_result() {
        let mock = Arc::new(MockGateway::new());
        mock.set_subscription_result(accepted(Some(active_subscription("sub_1"))));

        let request = SubscriptionRequest::new("tok_abc", "monthly");
        let view = Subscriptions::new(mock.clone()).create(&request).await.unwrap();

        assert!(view.success());
        assert_eq!(view.subscription().unwrap().id, "sub_1");
        assert_eq!(mock.calls()[0].method, "create_subscription");
        assert_eq!(mock.calls()[0].argument, "monthly");
    }

    #[tokio::test]
    async fn cancel_forwards_the_id_and_wraps_the_result() {
        let mock = Arc::new(MockGateway::new());
        mock.set_subscription_result(SubscriptionResult {
            success: true,
            message: None,
            subscription: Some(Subscription {
                status: SubscriptionStatus::Canceled,
                ..active_subscription("sub_1")
            }),
        });

        let view = Subscriptions::new(mock.clone()).cancel("sub_1").await.unwrap();

        assert!(view.success());
        assert_eq!(
            view.subscription().unwrap().status,
            SubscriptionStatus::Canceled
        );
        assert_eq!(mock.calls()[0].argument, "sub_1");
    }

    #[tokio::test]
    async fn gateway_failures_pass_through_unchanged() {
        let mock = Arc::new(MockGateway::new());
        mock.set_error(GatewayError::provider_with_code("plan does not exist", "91583"));

        let request = SubscriptionRequest::new("tok_abc", "ghost-plan");
        let err = Subscriptions::new(mock).create(&request).await.unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Provider { code: Some(ref c), .. } if c == "91583"
        ));
    }

    #[test]
    fn deref_exposes_the_wrapped_result_unchanged() {
        let view = SubscriptionView::new(SubscriptionResult {
            success: false,
            message: Some("declined".to_string()),
            subscription: None,
        });
        assert!(!view.success);
        assert_eq!(view.message.as_deref(), Some("declined"));
    }
}
