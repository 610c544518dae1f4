//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the booking pipeline to external systems:
//! - `storage` - Booking record collection (file, in-memory)
//! - `payment` - Razorpay gateway, checkout relay, mock gateway
//! - `notification` - Notice channels and the fallback dispatcher
//! - `ticket` - Ticket export to the local filesystem
//! - `http` - REST API

pub mod http;
pub mod notification;
pub mod payment;
pub mod storage;
pub mod ticket;
