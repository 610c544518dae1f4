//! Booking handlers.
//!
//! ## Commands
//! - Booking a trek end to end (validate, notify, charge, ticket)
//! - Charging a validated booking and recording it
//!
//! ## Queries
//! - Confirming a post-payment redirect
//! - Building payment links and verifying their callbacks

mod book_trek;
mod charge_booking;
mod confirm_payment;
mod payment_link;

// Commands
pub use book_trek::{
    BookTrekCommand, BookTrekHandler, BookTrekResult, BookingError, BookingOutcome,
    NotificationHandle,
};
pub use charge_booking::{ChargeBookingCommand, ChargeBookingHandler, ChargeError, ChargeOutcome};

// Queries
pub use confirm_payment::{ConfirmPaymentHandler, ConfirmPaymentQuery, PaymentConfirmation};
pub use payment_link::{PaymentLink, PaymentLinkError, PaymentLinkHandler, PaymentLinkQuery};
