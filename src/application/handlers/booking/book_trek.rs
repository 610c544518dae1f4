//! BookTrekHandler - The booking-to-ticket pipeline.
//!
//! 1. Validate the form (nothing external happens for invalid input)
//! 2. Fire the booking notification in the background
//! 3. Charge through the hosted checkout and record the booking
//! 4. Issue the ticket (failure here never touches the stored record)
//!
//! The notification runs on its own task. The pipeline never waits for it,
//! but the caller gets a handle to observe its `DispatchResult`.

use std::sync::Arc;

use chrono::FixedOffset;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::charge_booking::{ChargeBookingCommand, ChargeBookingHandler, ChargeError, ChargeOutcome};
use crate::adapters::notification::NotificationDispatcher;
use crate::application::handlers::ticket::{IssueTicketHandler, IssuedTicket, TicketError};
use crate::domain::booking::{BookingForm, BookingPolicy, BookingRecord, FieldErrors};
use crate::domain::foundation::Clock;
use crate::domain::notification::{BookingNotice, DispatchResult};

/// Command to book a trek from a submitted form.
#[derive(Debug, Clone)]
pub struct BookTrekCommand {
    pub form: BookingForm,
    /// Correlates the hosted checkout with this request.
    pub reference: String,
    /// Save the issued ticket through the exporter.
    pub export_ticket: bool,
}

#[derive(Debug)]
pub enum BookingOutcome {
    Confirmed {
        record: BookingRecord,
        /// The record stands even when the ticket could not be produced.
        ticket: Result<IssuedTicket, TicketError>,
    },
    /// The traveler dismissed the checkout. Nothing was recorded.
    Cancelled,
}

#[derive(Debug)]
pub struct BookTrekResult {
    pub outcome: BookingOutcome,
    pub notification: NotificationHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("invalid booking: {0}")]
    InvalidInput(FieldErrors),

    #[error("payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("payment rejected: {0}")]
    Rejected(String),

    #[error("payment {payment_id} succeeded but the booking was not recorded; contact support with this payment id")]
    PaymentNotRecorded { payment_id: String },
}

impl From<ChargeError> for BookingError {
    fn from(err: ChargeError) -> Self {
        match err {
            ChargeError::ProviderUnavailable(msg) => Self::ProviderUnavailable(msg),
            ChargeError::Rejected(msg) => Self::Rejected(msg),
            ChargeError::NotRecorded { payment_id, .. } => Self::PaymentNotRecorded { payment_id },
        }
    }
}

/// Background notification started by a booking.
#[derive(Debug)]
pub struct NotificationHandle(JoinHandle<DispatchResult>);

impl NotificationHandle {
    /// Waits for the dispatch to finish.
    ///
    /// Returns `None` only if the dispatch task itself panicked or was aborted.
    pub async fn outcome(self) -> Option<DispatchResult> {
        self.0.await.ok()
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

pub struct BookTrekHandler {
    policy: BookingPolicy,
    dispatcher: Arc<NotificationDispatcher>,
    charge: Arc<ChargeBookingHandler>,
    tickets: Arc<IssueTicketHandler>,
    clock: Arc<dyn Clock>,
    display_offset: FixedOffset,
}

impl BookTrekHandler {
    pub fn new(
        policy: BookingPolicy,
        dispatcher: Arc<NotificationDispatcher>,
        charge: Arc<ChargeBookingHandler>,
        tickets: Arc<IssueTicketHandler>,
        clock: Arc<dyn Clock>,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            policy,
            dispatcher,
            charge,
            tickets,
            clock,
            display_offset,
        }
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    pub async fn handle(&self, cmd: BookTrekCommand) -> Result<BookTrekResult, BookingError> {
        let intent = cmd.form.validate(&self.policy).map_err(BookingError::InvalidInput)?;

        let submitted_at = self
            .clock
            .now()
            .with_timezone(&self.display_offset)
            .format("%-d/%-m/%Y, %-I:%M:%S %P")
            .to_string();
        let notice = BookingNotice::from_intent(&intent, submitted_at);
        let dispatcher = self.dispatcher.clone();
        let notification =
            NotificationHandle(tokio::spawn(async move { dispatcher.notify(&notice).await }));

        let charged = self
            .charge
            .handle(ChargeBookingCommand {
                intent,
                reference: cmd.reference,
            })
            .await?;

        let outcome = match charged {
            ChargeOutcome::Cancelled => BookingOutcome::Cancelled,
            ChargeOutcome::Recorded(record) => {
                let ticket = self.tickets.issue(&record, cmd.export_ticket).await;
                BookingOutcome::Confirmed { record, ticket }
            }
        };

        Ok(BookTrekResult {
            outcome,
            notification,
        })
    }
}
