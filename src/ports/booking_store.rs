//! Booking record store port.
//!
//! A single named collection of booking records, searched by booking id.
//! `store` is the only mutating operation in the booking pipeline.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::booking::BookingRecord;

/// Errors surfaced by `BookingRecordStore::store`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The storage medium could not be reached or written.
    #[error("booking storage unavailable: {0}")]
    Unavailable(String),

    /// Existing data could not be read back.
    #[error("booking storage corrupted: {0}")]
    Corrupted(String),

    #[error("failed to serialize booking record: {0}")]
    SerializationFailed(String),
}

/// Persistence for booking records.
///
/// Implementations fail closed: `find` reports a missing or unreadable
/// collection as "not found", while `store` reports it as an error so that
/// a paid booking is never silently dropped.
#[async_trait]
pub trait BookingRecordStore: Send + Sync {
    /// Appends `record` to the collection. No upsert and no rollback.
    async fn store(&self, record: &BookingRecord) -> Result<(), StoreError>;

    /// First record whose booking id equals `booking_id`, if any.
    async fn find(&self, booking_id: &str) -> Option<BookingRecord>;
}
