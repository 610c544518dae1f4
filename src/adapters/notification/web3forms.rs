//! Web3Forms form-relay channel.
//!
//! Posts one form submission per configured recipient, all in parallel.
//! The channel succeeds if any recipient's submission is accepted.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::notification::BookingNotice;
use crate::ports::{ChannelError, ChannelReceipt, NotificationChannel};

#[derive(Debug, Deserialize)]
struct Web3FormsResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

/// Web3Forms notification channel.
pub struct Web3FormsChannel {
    endpoint: String,
    access_key: SecretString,
    recipients: Vec<String>,
    http_client: reqwest::Client,
}

impl Web3FormsChannel {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: SecretString,
        recipients: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, ChannelError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            access_key,
            recipients,
            http_client,
        })
    }

    async fn submit(&self, notice: &BookingNotice, recipient: &str) -> Result<(), ChannelError> {
        let subject = notice.subject();
        let from_name = notice.full_name();
        let message = notice.body();
        let form = [
            ("access_key", self.access_key.expose_secret().as_str()),
            ("to", recipient),
            ("from_name", from_name.as_str()),
            ("email", notice.email.as_str()),
            ("subject", subject.as_str()),
            ("message", message.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Status(status.as_u16()));
        }

        let body: Web3FormsResponse = response
            .json()
            .await
            .map_err(|e| ChannelError::MalformedResponse(e.to_string()))?;

        if body.success {
            Ok(())
        } else {
            Err(ChannelError::Declined(body.message))
        }
    }
}

#[async_trait]
impl NotificationChannel for Web3FormsChannel {
    fn name(&self) -> &'static str {
        "web3forms"
    }

    async fn deliver(&self, notice: &BookingNotice) -> Result<ChannelReceipt, ChannelError> {
        if self.recipients.is_empty() {
            return Err(ChannelError::Declined("no recipients configured".to_string()));
        }

        let results = join_all(
            self.recipients
                .iter()
                .map(|recipient| self.submit(notice, recipient)),
        )
        .await;

        let mut first_error = None;
        let mut accepted = 0;
        for (recipient, result) in self.recipients.iter().zip(results) {
            match result {
                Ok(()) => accepted += 1,
                Err(e) => {
                    tracing::debug!(recipient = %recipient, error = %e, "Web3Forms submission failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if accepted == 0 {
            return Err(first_error
                .unwrap_or_else(|| ChannelError::Declined("no submission accepted".to_string())));
        }

        Ok(ChannelReceipt {
            confirmed: true,
            message: format!(
                "Booking request submitted. Your trek booking has been sent to our team at {}. We will contact you within 24 hours to confirm your adventure.",
                self.recipients.join(" and ")
            ),
            compose_links: Vec::new(),
        })
    }
}
