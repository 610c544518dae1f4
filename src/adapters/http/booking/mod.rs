//! HTTP adapter for the booking pipeline.
//!
//! Exposes booking, checkout, ticket and offer endpoints:
//! - `POST /api/bookings` - Start a booking and its hosted checkout
//! - `POST /api/checkout/:reference/{complete,fail,dismiss}` - Checkout answers
//! - `GET /api/bookings/:booking_id[/ticket]` - Record and ticket download
//! - `GET /verify-booking/:booking_id` - Ticket verification
//! - `GET /payment-success` - Payment confirmation
//! - `GET /api/payments/link[-callback]` - Payment links
//! - `GET /api/offers/deadline` - Offer countdown

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{BookingApiError, BookingAppState, PendingBookings};
pub use routes::booking_router;
