//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id
    pub razorpay_key_id: String,

    /// Razorpay key secret
    pub razorpay_key_secret: SecretString,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Hosted page used for payment links
    #[serde(default = "default_payment_link_base_url")]
    pub payment_link_base_url: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_merchant_name")]
    pub merchant_name: String,

    #[serde(default = "default_theme_color")]
    pub theme_color: String,

    /// Timeout for each Razorpay API call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How long a hosted checkout may stay open before it counts as abandoned
    #[serde(default = "default_checkout_timeout")]
    pub checkout_timeout_secs: u64,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"));
        }
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKey);
        }
        if reqwest::Url::parse(&self.api_base_url).is_err() {
            return Err(ValidationError::InvalidUrl("payment.api_base_url"));
        }
        if reqwest::Url::parse(&self.payment_link_base_url).is_err() {
            return Err(ValidationError::InvalidUrl("payment.payment_link_base_url"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("payment.request_timeout_secs"));
        }
        if self.checkout_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("payment.checkout_timeout_secs"));
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_payment_link_base_url() -> String {
    "https://rzp.io/l/rapidophilia-trek".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_merchant_name() -> String {
    "Rapidophilia Travel Solutions".to_string()
}

fn default_theme_color() -> String {
    "#7C3AED".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_checkout_timeout() -> u64 {
    900
}
