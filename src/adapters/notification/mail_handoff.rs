//! Mail-client handoff, the last link of the notification chain.
//!
//! Produces one `mailto:` compose link per recipient for the traveler to
//! send from their own mail client. It always succeeds, but delivery cannot
//! be confirmed, so the receipt is marked unconfirmed.

use async_trait::async_trait;

use crate::domain::booking::format_inr;
use crate::domain::notification::BookingNotice;
use crate::ports::{ChannelError, ChannelReceipt, NotificationChannel};

pub struct MailHandoffChannel {
    recipients: Vec<String>,
    brand_name: String,
}

impl MailHandoffChannel {
    pub fn new(recipients: Vec<String>, brand_name: impl Into<String>) -> Self {
        Self {
            recipients,
            brand_name: brand_name.into(),
        }
    }

    /// `mailto:` link for one recipient.
    pub fn compose_link(&self, recipient: &str, notice: &BookingNotice) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&Self::subject(notice)),
            urlencoding::encode(&self.body(notice))
        )
    }

    fn subject(notice: &BookingNotice) -> String {
        format!("🏔️ URGENT: Trek Booking - {}", notice.trek)
    }

    fn body(&self, notice: &BookingNotice) -> String {
        format!(
            "Dear {brand} Team,\n\
             \n\
             🏔️ NEW TREK BOOKING REQUEST\n\
             \n\
             📋 BOOKING DETAILS:\n\
             - Trek Name: {trek}\n\
             - Number of Participants: {participants}\n\
             - Total Price: {total}\n\
             \n\
             👤 CUSTOMER INFORMATION:\n\
             - Name: {name}\n\
             - Email: {email}\n\
             - Phone: {phone}\n\
             \n\
             💬 CUSTOMER MESSAGE:\n\
             {message}\n\
             \n\
             📅 BOOKING SUBMITTED: {submitted_at}\n\
             \n\
             ⚡ URGENT: Please contact customer within 24 hours to confirm this booking!\n\
             \n\
             Best regards,\n\
             {name}",
            brand = self.brand_name,
            trek = notice.trek,
            participants = notice.participants,
            total = format_inr(notice.total_price),
            name = notice.full_name(),
            email = notice.email,
            phone = notice.phone,
            message = notice.message_or_default(),
            submitted_at = notice.submitted_at,
        )
    }
}

#[async_trait]
impl NotificationChannel for MailHandoffChannel {
    fn name(&self) -> &'static str {
        "mail_handoff"
    }

    async fn deliver(&self, notice: &BookingNotice) -> Result<ChannelReceipt, ChannelError> {
        let compose_links = self
            .recipients
            .iter()
            .map(|recipient| self.compose_link(recipient, notice))
            .collect();

        Ok(ChannelReceipt {
            confirmed: false,
            message: format!(
                "Please send the prepared emails to complete your booking request: {}.",
                self.recipients.join(" and ")
            ),
            compose_links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::test_support::sample_notice;

    fn channel() -> MailHandoffChannel {
        MailHandoffChannel::new(
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
            "Rapidophilia",
        )
    }

    #[tokio::test]
    async fn always_succeeds_without_confirmation() {
        let receipt = channel().deliver(&sample_notice()).await.unwrap();

        assert!(!receipt.confirmed);
        assert_eq!(receipt.compose_links.len(), 2);
        assert!(receipt.compose_links[0].starts_with("mailto:a@example.com?subject="));
        assert!(receipt.compose_links[1].starts_with("mailto:b@example.com?subject="));
    }

    #[test]
    fn compose_link_is_percent_encoded() {
        let link = channel().compose_link("a@example.com", &sample_notice());
        let query = link.split_once('?').unwrap().1;

        assert!(!query.contains(' '));
        assert!(!query.contains('\n'));
        assert!(query.contains("Nag%20Tibba%20Trek"));
        // Only the separator between subject and body survives unencoded.
        assert_eq!(query.matches('&').count(), 1);
    }

    #[test]
    fn body_carries_notice_content() {
        let body = channel().body(&sample_notice());
        assert!(body.starts_with("Dear Rapidophilia Team,"));
        assert!(body.contains("- Number of Participants: 2"));
        assert!(body.contains("No additional message"));
    }
}
