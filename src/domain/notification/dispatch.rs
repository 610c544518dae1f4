//! Outcome of a notification dispatch.

use serde::Serialize;

/// One failed channel attempt, kept so the caller can see why the chain
/// moved on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelAttempt {
    pub channel: usize,
    pub channel_name: String,
    pub error: String,
}

/// Result of walking the notification channel chain.
///
/// `confirmed` is false when the winning channel only handed the message
/// to the traveler's own mail client; delivery is then unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub success: bool,
    pub channel: usize,
    pub channel_name: String,
    pub confirmed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compose_links: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ChannelAttempt>,
}

impl DispatchResult {
    /// Result when every channel failed, including the last one.
    pub fn exhausted(failures: Vec<ChannelAttempt>) -> Self {
        Self {
            success: false,
            channel: failures.len().saturating_sub(1),
            channel_name: failures
                .last()
                .map(|f| f.channel_name.clone())
                .unwrap_or_default(),
            confirmed: false,
            message: "Booking assistance needed: please contact our team directly.".to_string(),
            compose_links: Vec::new(),
            failures,
        }
    }
}
