//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;
pub mod offer;
pub mod ticket;

pub use booking::{
    BookTrekCommand, BookTrekHandler, BookTrekResult, BookingError, BookingOutcome,
    ChargeBookingCommand, ChargeBookingHandler, ChargeError, ChargeOutcome,
    ConfirmPaymentHandler, ConfirmPaymentQuery, NotificationHandle, PaymentConfirmation,
    PaymentLink, PaymentLinkError, PaymentLinkHandler, PaymentLinkQuery,
};
pub use offer::{GetOfferDeadlineHandler, OfferDeadlineView};
pub use ticket::{
    IssueTicketHandler, IssueTicketQuery, IssuedTicket, TicketError, TicketSettings,
    VerifyBookingHandler, VerifyBookingQuery, VerifyBookingResult,
};
