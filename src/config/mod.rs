//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TREK_BOOKING` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use trek_booking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod booking;
mod error;
mod notification;
mod offer;
mod payment;
mod server;
mod storage;
mod ticket;

pub use booking::BookingConfig;
pub use error::{ConfigError, ValidationError};
pub use notification::NotificationConfig;
pub use offer::OfferConfig;
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;
pub use ticket::TicketConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only the payment section has required values; every other section has
/// working defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Booking collection location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Payment configuration (Razorpay)
    pub payment: PaymentConfig,

    /// Notification channels and recipients
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Pricing, limits and booking identity
    #[serde(default)]
    pub booking: BookingConfig,

    /// Ticket content and QR style
    #[serde(default)]
    pub ticket: TicketConfig,

    /// Weekly offer deadline
    #[serde(default)]
    pub offer: OfferConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TREK_BOOKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TREK_BOOKING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TREK_BOOKING__PAYMENT__RAZORPAY_KEY_ID=...` -> `payment.razorpay_key_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TREK_BOOKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.payment.validate()?;
        self.notification.validate()?;
        self.booking.validate()?;
        self.ticket.validate()?;
        self.offer.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TREK_BOOKING__PAYMENT__RAZORPAY_KEY_ID",
        "TREK_BOOKING__PAYMENT__RAZORPAY_KEY_SECRET",
        "TREK_BOOKING__SERVER__PORT",
        "TREK_BOOKING__SERVER__ENVIRONMENT",
        "TREK_BOOKING__BOOKING__PRICE_PER_PERSON",
        "TREK_BOOKING__OFFER__DEADLINE_WEEKDAY",
    ];

    fn set_minimal_env() {
        env::set_var("TREK_BOOKING__PAYMENT__RAZORPAY_KEY_ID", "rzp_test_key");
        env::set_var("TREK_BOOKING__PAYMENT__RAZORPAY_KEY_SECRET", "secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.payment.razorpay_key_id, "rzp_test_key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.storage.collection, "rapidophilia_bookings");
        assert_eq!(config.booking.price_per_person, 3499);
        assert_eq!(config.booking.id_prefix, "RT");
        assert_eq!(config.payment.checkout_timeout_secs, 900);
        assert_eq!(config.offer.deadline_weekday, Weekday::Thu);
    }

    #[test]
    fn test_nested_overrides() {
        let config = load_with(&[
            ("TREK_BOOKING__SERVER__PORT", "3000"),
            ("TREK_BOOKING__SERVER__ENVIRONMENT", "production"),
            ("TREK_BOOKING__BOOKING__PRICE_PER_PERSON", "4999"),
            ("TREK_BOOKING__OFFER__DEADLINE_WEEKDAY", "Friday"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.booking.price_per_person, 4999);
        assert_eq!(config.offer.deadline_weekday, Weekday::Fri);
    }

    #[test]
    fn test_missing_payment_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
