//! Foundation module - Shared domain primitives.
//!
//! Contains the booking reference type, its generator, and the clock
//! abstraction used across the booking pipeline.

mod clock;
mod ids;

pub use clock::{display_offset, Clock, FixedClock, SystemClock};
pub use ids::{BookingId, BookingIdGenerator};
