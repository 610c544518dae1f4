use super::qr::QrImage;
use crate::domain::booking::BookingRecord;

/// Everything printed on a ticket: the stored record, its QR image, and the
/// trip logistics. Never persisted; rebuilt from the record on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketData {
    pub record: BookingRecord,
    pub qr_image: QrImage,
    pub trek_date: String,
    pub reporting_time: String,
    pub reporting_location: String,
}
