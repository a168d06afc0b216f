//! Wire types for the gateway's JSON API.
//!
//! Kept separate from the domain types: the gateway speaks `MM/YYYY`
//! expiration strings and free-form status strings, the domain does not.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CardExpiration, Customer, ParseExpirationError, PaymentMethod, Subscription,
    SubscriptionStatus,
};
use crate::ports::{ConfirmationResult, GatewayError, SubscriptionResult, TrData};

/// Customer record as the gateway returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCustomer {
    pub id: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub custom_fields: std::collections::BTreeMap<String, String>,

    /// The gateway names stored payment methods "credit cards".
    #[serde(default, rename = "credit_cards")]
    pub payment_methods: Vec<WirePaymentMethod>,
}

/// Stored card as the gateway returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePaymentMethod {
    pub token: String,

    pub updated_at: chrono::DateTime<chrono::Utc>,

    #[serde(default)]
    pub card_type: String,

    #[serde(default)]
    pub last_4: String,

    #[serde(default)]
    pub cardholder_name: String,

    /// `MM/YYYY`.
    pub expiration_date: String,

    #[serde(default)]
    pub subscriptions: Vec<WireSubscription>,
}

/// Subscription as the gateway returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSubscription {
    pub id: String,

    pub plan_id: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub first_billing_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub next_billing_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub billing_period_start_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub billing_period_end_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub next_billing_period_amount: Option<String>,
}

/// Envelope for transparent-redirect data generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTrData {
    pub tr_data: String,
}

impl From<WireTrData> for TrData {
    fn from(wire: WireTrData) -> Self {
        TrData(wire.tr_data)
    }
}

/// Envelope for a transparent-redirect confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireConfirmation {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub customer: Option<WireCustomer>,
}

/// Envelope for subscription create/cancel responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSubscriptionResult {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub subscription: Option<WireSubscription>,
}

/// Error body the gateway attaches to non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct WireApiError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}

impl TryFrom<WirePaymentMethod> for PaymentMethod {
    type Error = ParseExpirationError;

    fn try_from(wire: WirePaymentMethod) -> Result<Self, Self::Error> {
        let expiration: CardExpiration = wire.expiration_date.parse()?;
        Ok(PaymentMethod {
            token: wire.token,
            updated_at: wire.updated_at,
            card_type: wire.card_type,
            last_4: wire.last_4,
            cardholder_name: wire.cardholder_name,
            expiration,
            subscriptions: wire.subscriptions.into_iter().map(Into::into).collect(),
        })
    }
}

impl From<WireSubscription> for Subscription {
    fn from(wire: WireSubscription) -> Self {
        Subscription {
            id: wire.id,
            plan_id: wire.plan_id,
            status: parse_status(wire.status.as_deref()),
            first_billing_date: wire.first_billing_date,
            next_billing_date: wire.next_billing_date,
            billing_period_start_date: wire.billing_period_start_date,
            billing_period_end_date: wire.billing_period_end_date,
            next_billing_period_amount: wire.next_billing_period_amount,
        }
    }
}

impl TryFrom<WireCustomer> for Customer {
    type Error = GatewayError;

    fn try_from(wire: WireCustomer) -> Result<Self, Self::Error> {
        let payment_methods = wire
            .payment_methods
            .into_iter()
            .map(PaymentMethod::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        Ok(Customer {
            id: wire.id,
            email: wire.email,
            custom_fields: wire.custom_fields,
            payment_methods,
        })
    }
}

impl TryFrom<WireConfirmation> for ConfirmationResult {
    type Error = GatewayError;

    fn try_from(wire: WireConfirmation) -> Result<Self, Self::Error> {
        Ok(ConfirmationResult {
            success: wire.success,
            message: wire.message,
            customer: wire.customer.map(Customer::try_from).transpose()?,
        })
    }
}

impl From<WireSubscriptionResult> for SubscriptionResult {
    fn from(wire: WireSubscriptionResult) -> Self {
        SubscriptionResult {
            success: wire.success,
            message: wire.message,
            subscription: wire.subscription.map(Into::into),
        }
    }
}

/// Map the gateway's free-form status string onto the domain enum.
fn parse_status(status: Option<&str>) -> SubscriptionStatus {
    match status.map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("active") => SubscriptionStatus::Active,
        Some("past due") | Some("past_due") => SubscriptionStatus::PastDue,
        Some("canceled") => SubscriptionStatus::Canceled,
        Some("expired") => SubscriptionStatus::Expired,
        Some("pending") => SubscriptionStatus::Pending,
        _ => SubscriptionStatus::Unknown,
    }
}
