//! Payment gateway adapter.
//!
//! Implements the `PaymentGateway` port over the provider's HTTP API:
//! - Transparent-redirect data generation and confirmation
//! - Customer lookup
//! - Subscription create/cancel
//!
//! # Configuration
//!
//! Required environment variables:
//! - `TRELLIS__GATEWAY__MERCHANT_ID`
//! - `TRELLIS__GATEWAY__PUBLIC_KEY`
//! - `TRELLIS__GATEWAY__PRIVATE_KEY`

mod http_gateway;
mod mock_gateway;
mod wire;

pub use http_gateway::HttpGateway;
pub use mock_gateway::{MockGateway, RecordedCall};
pub use wire::{WireConfirmation, WireCustomer, WirePaymentMethod, WireSubscription};
