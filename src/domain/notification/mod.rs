//! Notification module - Booking notices and dispatch outcomes.

mod dispatch;
mod notice;

pub use dispatch::{ChannelAttempt, DispatchResult};
pub use notice::BookingNotice;

#[cfg(test)]
pub(crate) use notice::test_support;
