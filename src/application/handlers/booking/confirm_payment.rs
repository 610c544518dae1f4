//! ConfirmPaymentHandler - Query behind the post-payment confirmation route.
//!
//! The redirect's query parameters are client supplied. `status == "paid"`
//! alone never shows a booking: the booking must exist and its stored
//! payment id must equal the one in the redirect.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::booking::BookingRecord;
use crate::ports::BookingRecordStore;

const PAID: &str = "paid";

#[derive(Debug, Clone, Default)]
pub struct ConfirmPaymentQuery {
    pub payment_id: Option<String>,
    pub booking_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentConfirmation {
    Confirmed { booking: BookingRecord },
    /// Status missing or anything other than `paid`.
    NotPaid,
    /// Claims payment for a booking that does not match the store.
    Unverified,
    /// Paid through a payment link; no booking exists for it.
    PaidWithoutBooking { payment_id: String },
}

pub struct ConfirmPaymentHandler {
    store: Arc<dyn BookingRecordStore>,
}

impl ConfirmPaymentHandler {
    pub fn new(store: Arc<dyn BookingRecordStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ConfirmPaymentQuery) -> PaymentConfirmation {
        if query.status.as_deref() != Some(PAID) {
            return PaymentConfirmation::NotPaid;
        }

        let payment_id = query.payment_id.unwrap_or_default();
        let Some(booking_id) = query.booking_id.filter(|id| !id.is_empty()) else {
            return PaymentConfirmation::PaidWithoutBooking { payment_id };
        };

        match self.store.find(&booking_id).await {
            Some(booking) if !payment_id.is_empty() && booking.payment_id() == payment_id => {
                PaymentConfirmation::Confirmed { booking }
            }
            _ => {
                tracing::warn!(
                    booking_id = %booking_id,
                    payment_id = %payment_id,
                    "Payment confirmation did not match a stored booking"
                );
                PaymentConfirmation::Unverified
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryBookingStore;
    use crate::domain::booking::{BookingForm, BookingPolicy};
    use crate::domain::foundation::BookingId;

    async fn handler() -> (ConfirmPaymentHandler, BookingRecord) {
        let intent = BookingForm {
            first_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            trek_title: "Nag Tibba Trek".to_string(),
            participants: 2,
            ..Default::default()
        }
        .validate(&BookingPolicy {
            price_per_person: 3499,
            max_participants: 15,
        })
        .unwrap();
        let record = BookingRecord::create(BookingId::new("RT111111AAA"), &intent, "PAY123", "18/10/2026");
        let store = Arc::new(InMemoryBookingStore::new());
        store.store(&record).await.unwrap();
        (ConfirmPaymentHandler::new(store), record)
    }

    fn query(payment_id: &str, booking_id: Option<&str>, status: &str) -> ConfirmPaymentQuery {
        ConfirmPaymentQuery {
            payment_id: Some(payment_id.to_string()),
            booking_id: booking_id.map(str::to_string),
            status: Some(status.to_string()),
        }
    }

    #[tokio::test]
    async fn matching_payment_confirms_booking() {
        let (handler, record) = handler().await;
        let result = handler.handle(query("PAY123", Some("RT111111AAA"), "paid")).await;
        assert_eq!(result, PaymentConfirmation::Confirmed { booking: record });
    }

    #[tokio::test]
    async fn status_other_than_paid_is_not_paid() {
        let (handler, _) = handler().await;
        assert_eq!(
            handler.handle(query("PAY123", Some("RT111111AAA"), "failed")).await,
            PaymentConfirmation::NotPaid
        );
        assert_eq!(
            handler.handle(ConfirmPaymentQuery::default()).await,
            PaymentConfirmation::NotPaid
        );
    }

    #[tokio::test]
    async fn mismatched_payment_id_is_unverified() {
        let (handler, _) = handler().await;
        assert_eq!(
            handler.handle(query("PAY999", Some("RT111111AAA"), "paid")).await,
            PaymentConfirmation::Unverified
        );
        assert_eq!(
            handler.handle(query("PAY123", Some("RT000000ZZZ"), "paid")).await,
            PaymentConfirmation::Unverified
        );
    }

    #[tokio::test]
    async fn paid_link_without_booking() {
        let (handler, _) = handler().await;
        assert_eq!(
            handler.handle(query("PAY555", None, "paid")).await,
            PaymentConfirmation::PaidWithoutBooking {
                payment_id: "PAY555".to_string()
            }
        );
    }
}
