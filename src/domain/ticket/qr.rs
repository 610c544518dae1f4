//! QR encoding of the verification payload.
//!
//! The payload is serialized to compact JSON and encoded as a PNG, returned
//! as a `data:` URL so the ticket can embed it inline.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::{imageops, ExtendedColorType, ImageBuffer, ImageEncoder, Rgb};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use serde::Serialize;
use thiserror::Error;

use super::verification::VerificationPayload;
use crate::domain::booking::BookingRecord;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors raised while encoding a QR image. No partial image is ever returned.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("payload of {bytes} bytes does not fit in a QR code")]
    PayloadTooLarge { bytes: usize },

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Visual style of the QR image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    /// Target edge length in pixels, quiet zone included.
    pub width: u32,
    /// Quiet zone, in modules.
    pub margin: u32,
    pub dark: [u8; 3],
    pub light: [u8; 3],
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            width: 200,
            margin: 2,
            dark: [0x7C, 0x3A, 0xED],
            light: [0xFF, 0xFF, 0xFF],
        }
    }
}

/// Parses `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// A rendered QR code as a PNG `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QrImage(String);

impl QrImage {
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn data_url(&self) -> &str {
        &self.0
    }

    pub fn is_inline(&self) -> bool {
        self.0.starts_with(DATA_URL_PREFIX)
    }
}

/// Encodes booking records into QR images with a fixed style.
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    style: QrStyle,
}

impl QrEncoder {
    pub fn new(style: QrStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &QrStyle {
        &self.style
    }

    /// Encodes `record` and its verification URL under `base_url`.
    ///
    /// Deterministic: the same record and base URL give the same bytes.
    pub fn encode(&self, record: &BookingRecord, base_url: &str) -> Result<QrImage, EncodeError> {
        let payload = VerificationPayload::for_record(record, base_url);
        let text = serde_json::to_string(&payload)?;
        let png = self.encode_text(&text)?;
        Ok(QrImage(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png))))
    }

    fn encode_text(&self, text: &str) -> Result<Vec<u8>, EncodeError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M).map_err(|e| {
            match e {
                QrError::DataTooLong => EncodeError::PayloadTooLarge { bytes: text.len() },
                other => EncodeError::Qr(other.to_string()),
            }
        })?;

        let modules = code.width() as u32;
        let span = modules + 2 * self.style.margin;
        let module_px = (self.style.width / span).max(1);

        let symbol = code
            .render::<Rgb<u8>>()
            .dark_color(Rgb(self.style.dark))
            .light_color(Rgb(self.style.light))
            .quiet_zone(false)
            .module_dimensions(module_px, module_px)
            .build();

        let side = span * module_px;
        let offset = i64::from(self.style.margin * module_px);
        let mut canvas = ImageBuffer::from_pixel(side, side, Rgb(self.style.light));
        imageops::overlay(&mut canvas, &symbol, offset, offset);

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(canvas.as_raw(), side, side, ExtendedColorType::Rgb8)?;
        Ok(png)
    }
}
