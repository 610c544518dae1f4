//! Booking policy configuration

use chrono::FixedOffset;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::booking::BookingPolicy;
use crate::domain::foundation::display_offset;

/// Pricing, limits and identity of bookings
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Whole rupees per participant
    #[serde(default = "default_price_per_person")]
    pub price_per_person: u64,

    #[serde(default = "default_max_participants")]
    pub max_participants: u32,

    /// Prefix of every booking reference
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Brand used in ticket file names and notification greetings
    #[serde(default = "default_brand_prefix")]
    pub brand_prefix: String,

    /// Offset of the display timezone in minutes east of UTC
    #[serde(default = "default_display_utc_offset")]
    pub display_utc_offset_minutes: i32,
}

impl BookingConfig {
    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            price_per_person: self.price_per_person,
            max_participants: self.max_participants,
        }
    }

    pub fn display_offset(&self) -> FixedOffset {
        display_offset(self.display_utc_offset_minutes)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price_per_person == 0 {
            return Err(ValidationError::InvalidPrice);
        }
        if self.max_participants == 0 {
            return Err(ValidationError::InvalidMaxParticipants);
        }
        let prefix_ok = (1..=4).contains(&self.id_prefix.len())
            && self.id_prefix.chars().all(|c| c.is_ascii_uppercase());
        if !prefix_ok {
            return Err(ValidationError::InvalidIdPrefix);
        }
        if self.brand_prefix.trim().is_empty() {
            return Err(ValidationError::MissingRequired("booking.brand_prefix"));
        }
        if self.display_utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ValidationError::InvalidUtcOffset);
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            price_per_person: default_price_per_person(),
            max_participants: default_max_participants(),
            id_prefix: default_id_prefix(),
            brand_prefix: default_brand_prefix(),
            display_utc_offset_minutes: default_display_utc_offset(),
        }
    }
}

fn default_price_per_person() -> u64 {
    3499
}

fn default_max_participants() -> u32 {
    15
}

fn default_id_prefix() -> String {
    "RT".to_string()
}

fn default_brand_prefix() -> String {
    "Rapidophilia".to_string()
}

fn default_display_utc_offset() -> i32 {
    330
}
