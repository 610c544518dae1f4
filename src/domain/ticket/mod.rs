//! Ticket module - QR verification payloads and printable tickets.

mod qr;
mod render;
mod ticket_data;
mod verification;

pub use qr::{parse_hex_color, EncodeError, QrEncoder, QrImage, QrStyle};
pub use render::{ContactInfo, TicketDocument, TicketRenderer, IMPORTANT_INSTRUCTIONS};
pub use ticket_data::TicketData;
pub use verification::{verification_url, VerificationPayload};
