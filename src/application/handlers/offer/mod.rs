//! Offer handlers.

mod get_offer_deadline;

pub use get_offer_deadline::{GetOfferDeadlineHandler, OfferDeadlineView};
