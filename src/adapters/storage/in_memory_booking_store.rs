//! In-Memory Booking Store Adapter
//!
//! Keeps booking records in a process-local list.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::BookingRecord;
use crate::ports::{BookingRecordStore, StoreError};

/// In-memory booking collection
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    records: Arc<RwLock<Vec<BookingRecord>>>,
}

impl InMemoryBookingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of every stored record, in insertion order
    pub async fn all(&self) -> Vec<BookingRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl BookingRecordStore for InMemoryBookingStore {
    async fn store(&self, record: &BookingRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find(&self, booking_id: &str) -> Option<BookingRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.booking_id().as_str() == booking_id)
            .cloned()
    }
}
