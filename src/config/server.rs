//! HTTP listener settings for the booking API.
//!
//! The API is called from the trek storefront in the browser, so the
//! storefront origins are part of this section.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on one API request. `POST /api/bookings` holds its
    /// request open until the provider order exists and checkout opens.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Storefront origins allowed to call the API, comma-separated.
    /// Any origin is accepted when unset.
    pub cors_origins: Option<String>,
}

/// Deployment stage; production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(raw))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Storefront origins, trimmed, with empty entries dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = &self.cors_origins else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout("server.request_timeout_secs"));
        }
        self.socket_addr()?;

        let origins = self.cors_origins_list();
        if let Some(bad) = origins
            .iter()
            .find(|o| !(o.starts_with("https://") || o.starts_with("http://")))
        {
            return Err(ValidationError::InvalidCorsOrigin(bad.clone()));
        }
        // Production never falls back to any-origin CORS.
        if self.is_production() && origins.is_empty() {
            return Err(ValidationError::MissingRequired("server.cors_origins"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,trek_booking=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storefront(origins: &str) -> ServerConfig {
        ServerConfig {
            cors_origins: Some(origins.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn local_development_needs_no_settings() {
        let config = ServerConfig::default();

        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.log_level.contains("trek_booking=debug"));
        assert!(config.cors_origins_list().is_empty());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn storefront_origins_are_normalized() {
        let config = storefront(" https://rapidophilia.com/ ,, http://localhost:5173");
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://rapidophilia.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn origin_without_scheme_is_rejected() {
        let config = storefront("https://rapidophilia.com, rapidophilia.in");
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCorsOrigin("rapidophilia.in".to_string()))
        );
    }

    #[test]
    fn production_requires_a_storefront_origin() {
        let open = ServerConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert_eq!(
            open.validate(),
            Err(ValidationError::MissingRequired("server.cors_origins"))
        );

        let pinned = ServerConfig {
            environment: Environment::Production,
            ..storefront("https://rapidophilia.com")
        };
        assert!(pinned.is_production());
        assert_eq!(pinned.validate(), Ok(()));
    }

    #[test]
    fn request_timeout_must_fit_checkout_opening() {
        for request_timeout_secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidTimeout("server.request_timeout_secs"))
            );
        }
    }

    #[test]
    fn bind_address_is_checked() {
        let loopback = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(loopback.socket_addr().unwrap().to_string(), "127.0.0.1:3000");

        let bad_host = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_host.validate(),
            Err(ValidationError::InvalidBindAddress(_))
        ));

        let no_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(no_port.validate(), Err(ValidationError::InvalidPort));
    }
}
