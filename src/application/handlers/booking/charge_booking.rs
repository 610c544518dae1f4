//! ChargeBookingHandler - Runs the hosted checkout and records the paid booking.
//!
//! This is where id generation, the payment gateway and the record store
//! compose. A record is written only after the gateway reports a payment,
//! and a payment that could not be recorded is surfaced with its payment id.

use std::sync::Arc;

use chrono::FixedOffset;
use thiserror::Error;

use crate::domain::booking::{BookingIntent, BookingRecord};
use crate::domain::foundation::{BookingId, BookingIdGenerator, Clock};
use crate::ports::{BookingRecordStore, CheckoutOutcome, PaymentError, PaymentGateway, PaymentRequest};

/// Fresh ids drawn before giving up on finding one not already stored.
const MAX_ID_DRAWS: usize = 3;

/// Command to charge a validated booking.
#[derive(Debug, Clone)]
pub struct ChargeBookingCommand {
    pub intent: BookingIntent,
    /// Correlates the checkout with this booking attempt.
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Recorded(BookingRecord),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargeError {
    #[error("payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("payment rejected: {0}")]
    Rejected(String),

    /// Money was taken but the booking could not be stored.
    #[error("payment {payment_id} succeeded but the booking was not recorded: {reason}")]
    NotRecorded { payment_id: String, reason: String },
}

impl From<PaymentError> for ChargeError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::ProviderUnavailable(msg) => Self::ProviderUnavailable(msg),
            PaymentError::Rejected(msg) => Self::Rejected(msg),
        }
    }
}

pub struct ChargeBookingHandler {
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn BookingRecordStore>,
    ids: Arc<BookingIdGenerator>,
    clock: Arc<dyn Clock>,
    display_offset: FixedOffset,
}

impl ChargeBookingHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn BookingRecordStore>,
        ids: Arc<BookingIdGenerator>,
        clock: Arc<dyn Clock>,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            gateway,
            store,
            ids,
            clock,
            display_offset,
        }
    }

    pub async fn handle(&self, cmd: ChargeBookingCommand) -> Result<ChargeOutcome, ChargeError> {
        let intent = cmd.intent;
        let request = PaymentRequest {
            amount: intent.amount(),
            customer_name: intent.full_name(),
            customer_email: intent.email().to_string(),
            customer_phone: intent.phone().to_string(),
            description: intent.trek_title().to_string(),
            reference: cmd.reference.clone(),
        };

        let outcome = self.gateway.load_and_open(&request).await.map_err(|e| {
            tracing::warn!(reference = %cmd.reference, error = %e, "Checkout failed");
            ChargeError::from(e)
        })?;

        let payment_id = match outcome {
            CheckoutOutcome::Paid { payment_id } => payment_id,
            CheckoutOutcome::Cancelled => {
                tracing::info!(reference = %cmd.reference, "Checkout cancelled by traveler");
                return Ok(ChargeOutcome::Cancelled);
            }
        };

        let now = self.clock.now();
        let booking_id = self.unused_booking_id().await;
        let booking_date = now
            .with_timezone(&self.display_offset)
            .format("%-d/%-m/%Y")
            .to_string();
        let record = BookingRecord::create(booking_id, &intent, payment_id.clone(), booking_date);

        if let Err(e) = self.store.store(&record).await {
            tracing::error!(
                payment_id = %payment_id,
                booking_id = %record.booking_id(),
                error = %e,
                "Payment captured but booking was not recorded"
            );
            return Err(ChargeError::NotRecorded {
                payment_id,
                reason: e.to_string(),
            });
        }

        tracing::info!(
            booking_id = %record.booking_id(),
            payment_id = %payment_id,
            amount = record.amount(),
            "Booking recorded"
        );
        Ok(ChargeOutcome::Recorded(record))
    }

    /// Draws ids until one is not already stored. The last draw is used
    /// regardless once the attempts run out.
    async fn unused_booking_id(&self) -> BookingId {
        let mut id = self.ids.generate(self.clock.now());
        for _ in 1..MAX_ID_DRAWS {
            if self.store.find(id.as_str()).await.is_none() {
                break;
            }
            tracing::warn!(booking_id = %id, "Booking id already stored, drawing another");
            id = self.ids.generate(self.clock.now());
        }
        id
    }
}
