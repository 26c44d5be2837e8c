//! PayPal gateway adapters.
//!
//! Implements the `IpnPostback` port:
//! - `ReqwestPostback` - HTTPS postback to the sandbox or live gateway
//! - `MockPostback` - Scripted replies for tests

mod mock_postback;
mod reqwest_postback;

pub use mock_postback::MockPostback;
pub use reqwest_postback::{ReqwestPostback, DEFAULT_TIMEOUT};
