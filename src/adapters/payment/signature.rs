//! HMAC-SHA256 signatures used by Razorpay callbacks.
//!
//! Checkout completion signs `order_id|payment_id`; payment-link callbacks
//! sign `link_id|reference_id|status|payment_id`. Both are hex-encoded and
//! keyed with the account's key secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `payload` under `secret`.
pub fn sign(secret: &[u8], payload: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a hex signature against `payload`.
pub fn verify(secret: &[u8], payload: &str, provided_hex: &str) -> bool {
    let Ok(provided) = hex::decode(provided_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload.as_bytes());
    let expected = mac.finalize().into_bytes();

    expected.as_slice().ct_eq(&provided).unwrap_u8() == 1
}

/// Payload signed on checkout completion.
pub fn checkout_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// Payload signed on payment-link completion.
pub fn link_payload(link_id: &str, reference_id: &str, status: &str, payment_id: &str) -> String {
    format!("{}|{}|{}|{}", link_id, reference_id, status, payment_id)
}
