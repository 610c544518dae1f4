//! The data embedded in a ticket's QR code.

use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingRecord;

/// Summary of a booking plus the URL that re-looks it up.
///
/// Field order is fixed so the serialized text, and therefore the QR image,
/// is the same every time for the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub booking_id: String,
    pub name: String,
    pub trek: String,
    pub participants: u32,
    pub payment_id: String,
    pub verification_url: String,
}

impl VerificationPayload {
    pub fn for_record(record: &BookingRecord, base_url: &str) -> Self {
        Self {
            booking_id: record.booking_id().to_string(),
            name: record.full_name(),
            trek: record.trek_title().to_string(),
            participants: record.participants(),
            payment_id: record.payment_id().to_string(),
            verification_url: verification_url(base_url, record.booking_id().as_str()),
        }
    }
}

/// `{base}/verify-booking/{booking_id}`, tolerating a trailing slash on `base`.
pub fn verification_url(base_url: &str, booking_id: &str) -> String {
    format!("{}/verify-booking/{}", base_url.trim_end_matches('/'), booking_id)
}
