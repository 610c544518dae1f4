//! Offer deadline configuration

use chrono::Weekday;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::offer::WeeklyAnchor;

#[derive(Debug, Clone, Deserialize)]
pub struct OfferConfig {
    /// Weekday the weekly booking window closes
    #[serde(default = "default_deadline_weekday")]
    pub deadline_weekday: Weekday,

    /// Hour of day (display timezone) the window closes
    #[serde(default = "default_deadline_hour")]
    pub deadline_hour: u32,
}

impl OfferConfig {
    pub fn anchor(&self) -> Result<WeeklyAnchor, ValidationError> {
        WeeklyAnchor::new(self.deadline_weekday, self.deadline_hour)
            .map_err(|_| ValidationError::InvalidDeadlineHour)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.anchor().map(|_| ())
    }
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            deadline_weekday: default_deadline_weekday(),
            deadline_hour: default_deadline_hour(),
        }
    }
}

fn default_deadline_weekday() -> Weekday {
    Weekday::Thu
}

fn default_deadline_hour() -> u32 {
    12
}
