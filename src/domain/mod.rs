//! Domain layer containing the gateway rules.
//!
//! # Module Organization
//!
//! - `checkout` - Payment request builder, form rendering, redirect correlation
//! - `notification` - IPN parameters, postback encoding, outcome classification

pub mod checkout;
pub mod notification;
