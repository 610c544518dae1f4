//! Booking form input and its validation.
//!
//! Validation runs before any external call. Every field is checked and all
//! problems are reported together so the form can show them inline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::pricing::total_price;

/// Longest free-text message accepted with a booking.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Raw booking details as submitted by the traveler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingForm {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub trek_title: String,
    pub participants: u32,
    #[serde(default)]
    pub message: Option<String>,
}

/// Commercial limits applied to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    pub price_per_person: u64,
    pub max_participants: u32,
}

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// A booking that passed validation and has been priced.
///
/// This is what the payment step charges for; it becomes a
/// `BookingRecord` only once the payment succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingIntent {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    trek_title: String,
    participants: u32,
    message: Option<String>,
    amount: u64,
}

impl BookingIntent {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name joined, without a trailing space for a missing last name.
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

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Total price in whole rupees.
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

pub(crate) fn join_name(first: &str, last: &str) -> String {
    if last.is_empty() {
        first.to_string()
    } else {
        format!("{} {}", first, last)
    }
}

impl BookingForm {
    /// Validates the form and prices it under `policy`.
    ///
    /// # Errors
    ///
    /// Returns every failing field with a message suitable for display.
    pub fn validate(&self, policy: &BookingPolicy) -> Result<BookingIntent, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = self.first_name.trim();
        if first_name.chars().count() < 2 {
            errors.insert(
                "firstName",
                "Please enter your first name (at least 2 characters).",
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required.");
        } else if !is_valid_email(email) {
            errors.insert("email", "Please enter a valid email address.");
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.insert("phone", "Phone number is required.");
        } else if !is_valid_phone(phone) {
            errors.insert(
                "phone",
                "Enter a valid phone number (digits only, include country code if applicable).",
            );
        }

        let trek_title = self.trek_title.trim();
        if trek_title.is_empty() {
            errors.insert("trekTitle", "Please select a trek.");
        }

        if self.participants < 1 {
            errors.insert("participants", "Please select the number of participants.");
        } else if self.participants > policy.max_participants {
            errors.insert(
                "participants",
                format!("Max participants allowed is {}.", policy.max_participants),
            );
        }

        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        if let Some(message) = message {
            if message.chars().count() > MAX_MESSAGE_LEN {
                errors.insert("message", "Message is too long (max 1000 characters).");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookingIntent {
            first_name: first_name.to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            trek_title: trek_title.to_string(),
            participants: self.participants,
            message: message.map(str::to_string),
            amount: total_price(policy.price_per_person, self.participants),
        })
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // A dot must separate two non-empty labels somewhere in the domain.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Optional leading `+` followed by 7 to 15 digits, ignoring whitespace.
pub fn is_valid_phone(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
