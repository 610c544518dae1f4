//! The persisted booking record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::form::{join_name, BookingIntent};
use crate::domain::foundation::BookingId;

/// One confirmed, paid-for trek reservation.
///
/// Records are created only after a successful payment and are never
/// modified afterwards, so every field is private and read through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    booking_id: BookingId,
    first_name: String,
    #[serde(default)]
    last_name: String,
    email: String,
    phone: String,
    trek_title: String,
    participants: u32,
    amount: u64,
    payment_id: String,
    booking_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl BookingRecord {
    /// Builds a record from a validated intent and the provider's payment id.
    ///
    /// `booking_date` is the display-formatted date of the booking.
    pub fn create(
        booking_id: BookingId,
        intent: &BookingIntent,
        payment_id: impl Into<String>,
        booking_date: impl Into<String>,
    ) -> Self {
        Self {
            booking_id,
            first_name: intent.first_name().to_string(),
            last_name: intent.last_name().to_string(),
            email: intent.email().to_string(),
            phone: intent.phone().to_string(),
            trek_title: intent.trek_title().to_string(),
            participants: intent.participants(),
            amount: intent.amount(),
            payment_id: payment_id.into(),
            booking_date: booking_date.into(),
            message: intent.message().map(str::to_string),
        }
    }

    pub fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn trek_title(&self) -> &str {
        &self.trek_title
    }

    pub fn participants(&self) -> u32 {
        self.participants
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn booking_date(&self) -> &str {
        &self.booking_date
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Calendar day the booking was made, parsed from `d/m/yyyy`.
    pub fn booked_on(&self) -> Option<NaiveDate> {
        let mut parts = self.booking_date.split('/');
        let day = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        let year = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}
