//! Booking module - Form validation, pricing, and the booking record.
//!
//! A `BookingForm` is validated into a priced `BookingIntent`. Once the
//! intent has been paid for it becomes an immutable `BookingRecord`.

mod form;
mod pricing;
mod record;

pub use form::{
    is_valid_email, is_valid_phone, BookingForm, BookingIntent, BookingPolicy, FieldErrors,
    MAX_MESSAGE_LEN,
};
pub(crate) use form::join_name;
pub use pricing::{format_inr, total_price};
pub use record::BookingRecord;
