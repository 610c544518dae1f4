//! Notification channel port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::BookingNotice;

/// What a channel reports after handling a notice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelReceipt {
    /// True when the service acknowledged delivery.
    pub confirmed: bool,
    /// Message suitable for showing to the traveler.
    pub message: String,
    /// `mailto:` links the traveler must open themselves, if any.
    pub compose_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("timed out after {0}s")]
    Timeout(u64),

    /// The service answered but refused the submission.
    #[error("declined: {0}")]
    Declined(String),
}

/// One independent way of delivering a booking notice.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, notice: &BookingNotice) -> Result<ChannelReceipt, ChannelError>;
}
