//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address {0}")]
    InvalidBindAddress(String),

    #[error("Invalid CORS origin {0}")]
    InvalidCorsOrigin(String),

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKey,

    #[error("Invalid storage collection name {0}")]
    InvalidCollectionName(String),

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Invalid email address in {0}")]
    InvalidEmail(&'static str),

    #[error("Price per person must be positive")]
    InvalidPrice,

    #[error("Maximum participants must be at least 1")]
    InvalidMaxParticipants,

    #[error("Booking id prefix must be 1-4 uppercase letters")]
    InvalidIdPrefix,

    #[error("Display UTC offset out of range")]
    InvalidUtcOffset,

    #[error("Invalid color {0}")]
    InvalidColor(String),

    #[error("QR width must be between 64 and 1024 pixels")]
    InvalidQrWidth,

    #[error("Deadline hour must be between 0 and 23")]
    InvalidDeadlineHour,
}
