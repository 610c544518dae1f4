//! Ticket configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::ticket::{parse_hex_color, ContactInfo, QrStyle};

/// Ticket display details and QR style
///
/// Tickets are produced as self-contained HTML only; there is no PDF
/// rendition, so exports are always `{brand}_Trek_Ticket_{id}.html`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketConfig {
    /// Base of the `/verify-booking/{id}` URL embedded in QR codes
    #[serde(default = "default_verification_base_url")]
    pub verification_base_url: String,

    /// Fixed trek date; the upcoming weekend window is printed when unset
    pub trek_date: Option<String>,

    #[serde(default = "default_reporting_time")]
    pub reporting_time: String,

    #[serde(default = "default_reporting_location")]
    pub reporting_location: String,

    #[serde(default = "default_contact_phone")]
    pub contact_phone: String,

    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    #[serde(default = "default_contact_address")]
    pub contact_address: String,

    #[serde(default = "default_qr_width")]
    pub qr_width: u32,

    #[serde(default = "default_qr_margin")]
    pub qr_margin: u32,

    #[serde(default = "default_qr_dark_color")]
    pub qr_dark_color: String,

    #[serde(default = "default_qr_light_color")]
    pub qr_light_color: String,

    /// Directory exported `.html` tickets are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl TicketConfig {
    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            phone: self.contact_phone.clone(),
            email: self.contact_email.clone(),
            address: self.contact_address.clone(),
        }
    }

    /// QR style from the configured colors. Call after `validate`.
    pub fn qr_style(&self) -> Result<QrStyle, ValidationError> {
        let dark = parse_hex_color(&self.qr_dark_color)
            .ok_or_else(|| ValidationError::InvalidColor(self.qr_dark_color.clone()))?;
        let light = parse_hex_color(&self.qr_light_color)
            .ok_or_else(|| ValidationError::InvalidColor(self.qr_light_color.clone()))?;
        Ok(QrStyle {
            width: self.qr_width,
            margin: self.qr_margin,
            dark,
            light,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if reqwest::Url::parse(&self.verification_base_url).is_err() {
            return Err(ValidationError::InvalidUrl("ticket.verification_base_url"));
        }
        if !(64..=1024).contains(&self.qr_width) {
            return Err(ValidationError::InvalidQrWidth);
        }
        self.qr_style()?;
        Ok(())
    }
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            verification_base_url: default_verification_base_url(),
            trek_date: None,
            reporting_time: default_reporting_time(),
            reporting_location: default_reporting_location(),
            contact_phone: default_contact_phone(),
            contact_email: default_contact_email(),
            contact_address: default_contact_address(),
            qr_width: default_qr_width(),
            qr_margin: default_qr_margin(),
            qr_dark_color: default_qr_dark_color(),
            qr_light_color: default_qr_light_color(),
            export_dir: default_export_dir(),
        }
    }
}

fn default_verification_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_reporting_time() -> String {
    "06:00 AM".to_string()
}

fn default_reporting_location() -> String {
    "Dehradun Railway Station".to_string()
}

fn default_contact_phone() -> String {
    "+91 98765 43210".to_string()
}

fn default_contact_email() -> String {
    "rapidophiliatravelsolutions@gmail.com".to_string()
}

fn default_contact_address() -> String {
    "Dehradun, Uttarakhand, India".to_string()
}

fn default_qr_width() -> u32 {
    200
}

fn default_qr_margin() -> u32 {
    2
}

fn default_qr_dark_color() -> String {
    "#7C3AED".to_string()
}

fn default_qr_light_color() -> String {
    "#FFFFFF".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("./tickets")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_brand() {
        let config = TicketConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.qr_style().unwrap(), QrStyle::default());
    }

    #[test]
    fn bad_color_is_rejected() {
        let config = TicketConfig {
            qr_dark_color: "purple".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidColor("purple".to_string()))
        );
    }

    #[test]
    fn tiny_qr_is_rejected() {
        let config = TicketConfig {
            qr_width: 10,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidQrWidth));
    }

    #[test]
    fn relative_verification_url_is_rejected() {
        let config = TicketConfig {
            verification_base_url: "/verify".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
