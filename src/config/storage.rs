//! Booking storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the booking collection lives on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the single booking collection
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.collection.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.collection"));
        }
        if self.collection.contains(['/', '\\']) || self.collection.contains("..") {
            return Err(ValidationError::InvalidCollectionName(self.collection.clone()));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            collection: default_collection(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_collection() -> String {
    "rapidophilia_bookings".to_string()
}
