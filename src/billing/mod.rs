//! Billing components.
//!
//! The three adapter surfaces this crate exposes to the surrounding
//! application: transparent-redirect flows, customer views, and subscription
//! pass-throughs. Each is a stateless, single-shot view over one gateway
//! call; the gateway port and the resolved redirect configuration are
//! injected at construction.

mod customer;
mod redirect;
mod subscription;

pub use customer::{CustomerView, Customers};
pub use redirect::{RedirectConfirmation, TransparentRedirect};
pub use subscription::{SubscriptionView, Subscriptions};
