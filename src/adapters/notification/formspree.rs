//! Formspree JSON relay channel.
//!
//! A single JSON post naming every recipient.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::notification::BookingNotice;
use crate::ports::{ChannelError, ChannelReceipt, NotificationChannel};

#[derive(Debug, Serialize)]
struct FormspreeBody<'a> {
    to: &'a [String],
    subject: String,
    name: String,
    email: &'a str,
    phone: &'a str,
    message: String,
}

/// Formspree notification channel.
pub struct FormspreeChannel {
    endpoint: String,
    recipients: Vec<String>,
    http_client: reqwest::Client,
}

impl FormspreeChannel {
    pub fn new(
        endpoint: impl Into<String>,
        recipients: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, ChannelError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            recipients,
            http_client,
        })
    }
}

#[async_trait]
impl NotificationChannel for FormspreeChannel {
    fn name(&self) -> &'static str {
        "formspree"
    }

    async fn deliver(&self, notice: &BookingNotice) -> Result<ChannelReceipt, ChannelError> {
        let body = FormspreeBody {
            to: &self.recipients,
            subject: notice.subject(),
            name: notice.full_name(),
            email: &notice.email,
            phone: &notice.phone,
            message: notice.body(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Status(status.as_u16()));
        }

        Ok(ChannelReceipt {
            confirmed: true,
            message: "Booking request submitted. Your trek booking has been sent to our team. We will contact you within 24 hours.".to_string(),
            compose_links: Vec::new(),
        })
    }
}
