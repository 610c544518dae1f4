//! Trek Booking - Booking-to-ticket pipeline for guided treks
//!
//! A traveler's booking form is validated, the operator is notified in the
//! background, payment runs through a hosted checkout, and a paid booking is
//! recorded and turned into a QR-coded ticket. A weekly offer deadline drives
//! the countdown shown next to the booking form.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
