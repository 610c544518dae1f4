//! Storage Adapters
//!
//! Implementations of the BookingRecordStore port.
//!
//! ## Available Adapters
//!
//! - **FileBookingStore** - One JSON collection file on disk
//! - **InMemoryBookingStore** - Process-local list (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileBookingStore, InMemoryBookingStore};
//!
//! // Production: file-based storage
//! let store = FileBookingStore::new("./data", "rapidophilia_bookings");
//!
//! // Testing: in-memory storage
//! let store = InMemoryBookingStore::new();
//! ```

mod file_booking_store;
mod in_memory_booking_store;

pub use file_booking_store::FileBookingStore;
pub use in_memory_booking_store::InMemoryBookingStore;
