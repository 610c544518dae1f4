//! Booking notification configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::booking::is_valid_email;

/// Notification channel configuration
///
/// A channel without its credentials is left out of the chain. The
/// mail-client handoff needs only the recipients and is always last.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Comma-separated recipient inboxes
    #[serde(default = "default_recipients")]
    pub recipients: String,

    #[serde(default = "default_web3forms_endpoint")]
    pub web3forms_endpoint: String,

    pub web3forms_access_key: Option<SecretString>,

    pub formspree_endpoint: Option<String>,

    /// Upper bound on each channel attempt
    #[serde(default = "default_channel_timeout")]
    pub channel_timeout_secs: u64,
}

impl NotificationConfig {
    pub fn recipients_list(&self) -> Vec<String> {
        self.recipients
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let recipients = self.recipients_list();
        if recipients.is_empty() {
            return Err(ValidationError::MissingRequired("notification.recipients"));
        }
        if !recipients.iter().all(|r| is_valid_email(r)) {
            return Err(ValidationError::InvalidEmail("notification.recipients"));
        }
        if reqwest::Url::parse(&self.web3forms_endpoint).is_err() {
            return Err(ValidationError::InvalidUrl("notification.web3forms_endpoint"));
        }
        if let Some(endpoint) = &self.formspree_endpoint {
            if reqwest::Url::parse(endpoint).is_err() {
                return Err(ValidationError::InvalidUrl("notification.formspree_endpoint"));
            }
        }
        if self.channel_timeout_secs == 0 || self.channel_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("notification.channel_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipients: default_recipients(),
            web3forms_endpoint: default_web3forms_endpoint(),
            web3forms_access_key: None,
            formspree_endpoint: None,
            channel_timeout_secs: default_channel_timeout(),
        }
    }
}

fn default_recipients() -> String {
    "rapidophiliatravelsolutions@gmail.com,tanishqdalal54@gmail.com".to_string()
}

fn default_web3forms_endpoint() -> String {
    "https://api.web3forms.com/submit".to_string()
}

fn default_channel_timeout() -> u64 {
    10
}
