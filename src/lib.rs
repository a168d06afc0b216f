//! Trellis - typed adapter layer over a hosted payment gateway.
//!
//! The gateway owns all payment state (customers, stored payment methods,
//! subscriptions); this crate reshapes requests into the forms the gateway
//! expects and layers convenience accessors over its responses.

pub mod adapters;
pub mod billing;
pub mod config;
pub mod domain;
pub mod ports;
