//! Payment gateway adapters.
//!
//! - `RazorpayGateway` - Razorpay orders, hosted checkout, payment links
//! - `CheckoutRelay` - Checkout window bridged to the HTTP surface
//! - `MockPaymentGateway` - Scripted gateway for tests

mod checkout_relay;
mod mock_payment_gateway;
mod razorpay_gateway;
pub mod signature;

pub use checkout_relay::{CheckoutRelay, RelayError};
pub use mock_payment_gateway::MockPaymentGateway;
pub use razorpay_gateway::{RazorpayConfig, RazorpayGateway};
