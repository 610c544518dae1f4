//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (booking ids, clock)
//! - `booking` - Form validation, pricing, and the booking record
//! - `ticket` - QR verification payloads and ticket rendering
//! - `notification` - Booking notices and dispatch outcomes
//! - `offer` - Deadline and countdown computations

pub mod booking;
pub mod foundation;
pub mod notification;
pub mod offer;
pub mod ticket;
