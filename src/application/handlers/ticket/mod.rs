//! Ticket handlers.
//!
//! ## Queries
//! - Issuing (and optionally exporting) the ticket for a stored booking
//! - Verifying a booking from its QR verification URL

mod issue_ticket;
mod verify_booking;

pub use issue_ticket::{IssueTicketHandler, IssueTicketQuery, IssuedTicket, TicketError, TicketSettings};
pub use verify_booking::{VerifyBookingHandler, VerifyBookingQuery, VerifyBookingResult};
