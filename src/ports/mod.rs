//! Ports - interfaces for external dependencies.
//!
//! The single port here is the upstream payment gateway. Adapters implement
//! it; the billing components consume it.

mod gateway;

pub use gateway::{
    ConfirmationResult, CustomerCreationRequest, CustomerParams, GatewayError, PaymentGateway,
    PaymentMethodUpdateRequest, SubscriptionRequest, SubscriptionResult, TrData,
};
