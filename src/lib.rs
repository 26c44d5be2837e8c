//! PayPal Website Payments Standard integration
//!
//! Builds the hosted-checkout form a merchant page posts to the gateway,
//! verifies Instant Payment Notifications by posting them back to the
//! gateway, and correlates buyer returns through the `pp_a` query parameter.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
