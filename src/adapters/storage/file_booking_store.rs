//! File-based Booking Store Adapter
//!
//! Keeps the whole booking collection as one JSON array on disk.
//!
//! # Layout
//!
//! ```text
//! {data_dir}/
//! └── {collection}.json     [ {BookingRecord}, ... ]
//! ```
//!
//! # Writes
//!
//! Writers are serialized through an async mutex. Each write reads the
//! current collection, appends, and replaces the file with the
//! write-to-temp-then-rename pattern so readers never see a partial file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::booking::BookingRecord;
use crate::ports::{BookingRecordStore, StoreError};

/// File-backed booking collection
#[derive(Debug, Clone)]
pub struct FileBookingStore {
    data_dir: PathBuf,
    collection: String,
    write_lock: Arc<Mutex<()>>,
}

impl FileBookingStore {
    /// Create a store for `{data_dir}/{collection}.json`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileBookingStore::new("./data", "rapidophilia_bookings");
    /// ```
    pub fn new<P: AsRef<Path>>(data_dir: P, collection: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            collection: collection.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the collection file
    pub fn collection_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.collection))
    }

    fn temp_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json.tmp", self.collection))
    }

    /// Reads the collection. A missing file is an empty collection.
    async fn load(&self) -> Result<Vec<BookingRecord>, StoreError> {
        let path = self.collection_path();
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StoreError::Corrupted(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    async fn persist(&self, records: &[BookingRecord]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).await.map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to create data directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        let temp_path = self.temp_path();
        let final_path = self.collection_path();

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(&json).await.map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to write temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl BookingRecordStore for FileBookingStore {
    async fn store(&self, record: &BookingRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        records.push(record.clone());
        self.persist(&records).await?;

        tracing::debug!(
            booking_id = %record.booking_id(),
            total = records.len(),
            "Booking record stored"
        );
        Ok(())
    }

    async fn find(&self, booking_id: &str) -> Option<BookingRecord> {
        match self.load().await {
            Ok(records) => records
                .into_iter()
                .find(|r| r.booking_id().as_str() == booking_id),
            Err(e) => {
                tracing::warn!(booking_id, error = %e, "Booking lookup failed, treating as not found");
                None
            }
        }
    }
}
