//! The booking notice sent to the brand's inboxes.

use serde::Serialize;

use crate::domain::booking::{format_inr, join_name, BookingIntent};

const NO_MESSAGE: &str = "No additional message";

/// Content of a booking notification.
///
/// Every channel renders this same content so whichever channel succeeds,
/// the recipient gets equivalent information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingNotice {
    pub trek: String,
    pub participants: u32,
    pub total_price: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    /// Display-formatted submission time.
    pub submitted_at: String,
}

impl BookingNotice {
    pub fn from_intent(intent: &BookingIntent, submitted_at: impl Into<String>) -> Self {
        Self {
            trek: intent.trek_title().to_string(),
            participants: intent.participants(),
            total_price: intent.amount(),
            first_name: intent.first_name().to_string(),
            last_name: intent.last_name().to_string(),
            email: intent.email().to_string(),
            phone: intent.phone().to_string(),
            message: intent.message().map(str::to_string),
            submitted_at: submitted_at.into(),
        }
    }

    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn subject(&self) -> String {
        format!("🏔️ Trek Booking: {}", self.trek)
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(NO_MESSAGE)
    }

    /// Plain-text body shared by all channels.
    pub fn body(&self) -> String {
        format!(
            "🏔️ NEW TREK BOOKING REQUEST\n\
             \n\
             📋 BOOKING DETAILS:\n\
             Trek: {trek}\n\
             Participants: {participants}\n\
             Total Price: {total}\n\
             \n\
             👤 CUSTOMER DETAILS:\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             \n\
             💬 MESSAGE: {message}\n\
             📅 BOOKING TIME: {submitted_at}\n\
             \n\
             ⚡ Contact customer within 24 hours!",
            trek = self.trek,
            participants = self.participants,
            total = format_inr(self.total_price),
            name = self.full_name(),
            email = self.email,
            phone = self.phone,
            message = self.message_or_default(),
            submitted_at = self.submitted_at,
        )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::BookingNotice;

    pub fn sample_notice() -> BookingNotice {
        BookingNotice {
            trek: "Nag Tibba Trek".to_string(),
            participants: 2,
            total_price: 6998,
            first_name: "Asha".to_string(),
            last_name: "Rawat".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            message: None,
            submitted_at: "18/10/2026, 3:00:00 pm".to_string(),
        }
    }
}
