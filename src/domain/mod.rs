//! Domain types mirrored from the payment gateway.
//!
//! Every entity here is owned and mutated by the gateway; these are transient
//! read-only views built per call, never cached or written back.

mod customer;
mod plan;
mod subscription;

pub use customer::{
    newest_payment_method, CardExpiration, Customer, ParseExpirationError, PaymentMethod,
};
pub use plan::Plan;
pub(crate) use plan::PLAN_CUSTOM_FIELD;
pub use subscription::{Subscription, SubscriptionStatus};
