//! Customer lookup and billing accessors.

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{newest_payment_method, Customer, PaymentMethod, Subscription};
use crate::ports::{GatewayError, PaymentGateway};

/// Customer lookups against the gateway.
pub struct Customers {
    gateway: Arc<dyn PaymentGateway>,
}

impl Customers {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a customer record and wrap it.
    ///
    /// A customer the gateway does not know yields
    /// [`GatewayError::NotFound`].
    pub async fn find(&self, customer_id: &str) -> Result<CustomerView, GatewayError> {
        let customer = self.gateway.find_customer(customer_id).await?;
        Ok(CustomerView::new(customer))
    }
}

/// Read-only view over a gateway customer record.
///
/// Dereferences to the wrapped [`Customer`], so every field stays reachable
/// exactly as on the record itself.
#[derive(Debug, Clone)]
pub struct CustomerView {
    customer: Customer,
}

impl CustomerView {
    pub fn new(customer: Customer) -> Self {
        Self { customer }
    }

    /// The payment method most recently updated at the gateway.
    pub fn payment_method(&self) -> Option<&PaymentMethod> {
        newest_payment_method(&self.customer.payment_methods)
    }

    /// The subscription of interest: the *last* subscription on the *first*
    /// payment method, in gateway order.
    ///
    /// Note the asymmetry with [`CustomerView::payment_method`], which picks
    /// the newest card. The original system behaved this way and callers
    /// depend on it; see the pinning test below before changing it.
    pub fn subscription(&self) -> Option<&Subscription> {
        self.customer
            .payment_methods
            .first()
            .and_then(|pm| pm.subscriptions.last())
    }

    pub fn first_billing_date(&self) -> Option<NaiveDate> {
        self.subscription().and_then(|s| s.first_billing_date)
    }

    pub fn next_billing_date(&self) -> Option<NaiveDate> {
        self.subscription().and_then(|s| s.next_billing_date)
    }

    pub fn billing_period_start_date(&self) -> Option<NaiveDate> {
        self.subscription().and_then(|s| s.billing_period_start_date)
    }

    pub fn billing_period_end_date(&self) -> Option<NaiveDate> {
        self.subscription().and_then(|s| s.billing_period_end_date)
    }

    /// Amount of the next billing period, as the gateway's decimal string.
    pub fn next_billing_period_amount(&self) -> Option<&str> {
        self.subscription()
            .and_then(|s| s.next_billing_period_amount.as_deref())
    }

    /// Plan ID of the subscription of interest.
    pub fn plan(&self) -> Option<&str> {
        self.subscription().map(|s| s.plan_id.as_str())
    }

    /// Token of the newest payment method.
    pub fn token(&self) -> Option<&str> {
        self.payment_method().map(|pm| pm.token.as_str())
    }

    pub fn card_type(&self) -> Option<&str> {
        self.payment_method().map(|pm| pm.card_type.as_str())
    }

    pub fn last_4(&self) -> Option<&str> {
        self.payment_method().map(|pm| pm.last_4.as_str())
    }

    pub fn cardholder_name(&self) -> Option<&str> {
        self.payment_method().map(|pm| pm.cardholder_name.as_str())
    }

    /// True iff the newest payment method's expiration month has fully
    /// passed as of `now`. A customer without a payment method is not
    /// expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.payment_method()
            .is_some_and(|pm| pm.expiration.is_expired_at(now))
    }

    /// [`CustomerView::is_expired_at`] against the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn into_inner(self) -> Customer {
        self.customer
    }
}

impl Deref for CustomerView {
    type Target = Customer;

    fn deref(&self) -> &Self::Target {
        &self.customer
    }
}
