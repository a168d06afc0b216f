//! Subscription records billed by the gateway.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recurring billing agreement held by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Gateway-issued subscription ID.
    pub id: String,

    /// Identifier of the plan being billed.
    pub plan_id: String,

    /// Current status as reported by the gateway.
    #[serde(default)]
    pub status: SubscriptionStatus,

    /// Date of the first billing cycle.
    pub first_billing_date: Option<NaiveDate>,

    /// Date the next cycle bills.
    pub next_billing_date: Option<NaiveDate>,

    /// Start of the current billing period.
    pub billing_period_start_date: Option<NaiveDate>,

    /// End of the current billing period.
    pub billing_period_end_date: Option<NaiveDate>,

    /// Amount of the next billing period, as the gateway's decimal string.
    pub next_billing_period_amount: Option<String>,
}

/// Subscription status from the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Billing normally.
    Active,

    /// Payment past due, gateway retrying.
    PastDue,

    /// Canceled; no further billing.
    Canceled,

    /// Ran to the end of its term.
    Expired,

    /// Created but not yet billed.
    Pending,

    /// Status string the gateway added after this crate was built.
    #[default]
    Unknown,
}

impl SubscriptionStatus {
    /// Whether the gateway will still bill this subscription.
    pub fn is_billing(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active | SubscriptionStatus::PastDue | SubscriptionStatus::Pending
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_statuses() {
        assert!(SubscriptionStatus::Active.is_billing());
        assert!(SubscriptionStatus::PastDue.is_billing());
        assert!(!SubscriptionStatus::Canceled.is_billing());
        assert!(!SubscriptionStatus::Expired.is_billing());
    }
}
