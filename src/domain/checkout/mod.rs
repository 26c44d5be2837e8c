//! Hosted checkout domain.
//!
//! Builds the redirect form the buyer's browser submits to the gateway, and
//! correlates the gateway's redirects back to the merchant.
//!
//! # Module Structure
//!
//! - `payment_request` - Validating builder and form rendering
//! - `currency` - Accepted currency codes
//! - `endpoint` - Sandbox / live gateway selection
//! - `status` - `pp_a` correlation tag
//! - `errors` - Builder errors

mod currency;
mod endpoint;
mod errors;
mod payment_request;
mod status;

pub use currency::CurrencyCode;
pub use endpoint::{GatewayEndpoint, GATEWAY_PATH};
pub use errors::CheckoutError;
pub use payment_request::{fields, PaymentRequest, FORM_NAME};
pub use status::{CheckoutStatus, CORRELATION_PARAM};
