//! Payment gateway port.
//!
//! Two interaction modes share this port:
//!
//! - **Hosted checkout**: `load_and_open` creates an order with the provider
//!   and opens its checkout UI through a [`CheckoutWindow`]. The call
//!   resolves once the traveler pays or walks away.
//! - **Payment link**: `payment_link` builds a URL for out-of-band payment.
//!   It has no callback, so completion is confirmed later through the
//!   signed link callback and the confirmation redirect.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the traveler is being charged for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in whole rupees.
    pub amount: u64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub description: String,
    /// Caller-chosen reference that correlates the checkout with this request.
    pub reference: String,
}

/// Terminal outcome of a hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Paid { payment_id: String },
    /// The traveler closed or abandoned the checkout. Not an error.
    Cancelled,
}

/// Failures that are not a traveler decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The provider could not be reached, timed out, or failed internally.
    #[error("payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider declined the request or the payment failed verification.
    #[error("payment rejected: {0}")]
    Rejected(String),
}

/// Prefilled customer fields shown in the checkout UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the checkout UI needs to open for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSession {
    pub reference: String,
    pub order_id: String,
    pub key_id: String,
    /// Amount in the currency's minor unit (paise).
    pub amount_minor: u64,
    pub currency: String,
    pub merchant_name: String,
    pub description: String,
    pub prefill: CheckoutPrefill,
    pub theme_color: String,
}

/// What the checkout UI reported back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WidgetResponse {
    Completed {
        order_id: String,
        payment_id: String,
        signature: String,
    },
    Failed {
        reason: String,
    },
    Dismissed,
}

/// Effect boundary that shows the provider's checkout UI.
///
/// Implementations resolve when the UI answers. A UI that never answers is
/// reported as `Dismissed`.
#[async_trait]
pub trait CheckoutWindow: Send + Sync {
    async fn open(&self, session: &CheckoutSession) -> Result<WidgetResponse, PaymentError>;
}

/// Fields prefilled into a payment link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLinkRequest {
    pub amount: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// Query parameters the provider appends when a payment link completes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkCallback {
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(rename = "razorpay_payment_link_id")]
    pub link_id: String,
    #[serde(rename = "razorpay_payment_link_reference_id", default)]
    pub reference_id: String,
    #[serde(rename = "razorpay_payment_link_status")]
    pub status: String,
    #[serde(rename = "razorpay_signature")]
    pub signature: String,
}

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Runs a hosted checkout for `request` to a terminal outcome.
    async fn load_and_open(&self, request: &PaymentRequest) -> Result<CheckoutOutcome, PaymentError>;

    /// Deterministic payment link for out-of-band completion.
    fn payment_link(&self, request: &PaymentLinkRequest) -> String;

    /// Verifies the provider signature on a payment-link callback.
    fn verify_link_callback(&self, callback: &LinkCallback) -> Result<(), PaymentError>;
}
