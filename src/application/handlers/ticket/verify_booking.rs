//! VerifyBookingHandler - Query behind the verification URL printed in the QR code.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::booking::BookingRecord;
use crate::domain::ticket::VerificationPayload;
use crate::ports::BookingRecordStore;

#[derive(Debug, Clone)]
pub struct VerifyBookingQuery {
    pub booking_id: String,
}

/// Lookup outcome. A missing booking is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyBookingResult {
    Found {
        booking: BookingRecord,
        verification: VerificationPayload,
    },
    NotFound {
        booking_id: String,
    },
}

pub struct VerifyBookingHandler {
    store: Arc<dyn BookingRecordStore>,
    verification_base_url: String,
}

impl VerifyBookingHandler {
    pub fn new(store: Arc<dyn BookingRecordStore>, verification_base_url: impl Into<String>) -> Self {
        Self {
            store,
            verification_base_url: verification_base_url.into(),
        }
    }

    pub async fn handle(&self, query: VerifyBookingQuery) -> VerifyBookingResult {
        match self.store.find(&query.booking_id).await {
            Some(booking) => {
                let verification = VerificationPayload::for_record(&booking, &self.verification_base_url);
                VerifyBookingResult::Found {
                    booking,
                    verification,
                }
            }
            None => {
                tracing::debug!(booking_id = %query.booking_id, "Verification lookup missed");
                VerifyBookingResult::NotFound {
                    booking_id: query.booking_id,
                }
            }
        }
    }
}
