//! Offer module - Pure time computations for deadlines and countdowns.
//!
//! Nothing here reads the wall clock; every function takes "now" explicitly.

mod countdown;
mod deadline;
mod trip_window;

pub use countdown::{remaining, Countdown, OfferCountdown, UrgencyLevel};
pub use deadline::{next_weekly_deadline, ClockError, WeeklyAnchor};
pub use trip_window::{weekend_trip_window, TripWindow};
