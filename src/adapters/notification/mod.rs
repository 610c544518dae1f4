//! Notification adapters.
//!
//! - `NotificationDispatcher` - Ordered first-success-wins channel chain
//! - `Web3FormsChannel` - Form relay, one submission per recipient
//! - `FormspreeChannel` - JSON relay, one submission for all recipients
//! - `MailHandoffChannel` - `mailto:` compose links, delivery unconfirmed

mod dispatcher;
mod formspree;
mod mail_handoff;
mod web3forms;

pub use dispatcher::NotificationDispatcher;
pub use formspree::FormspreeChannel;
pub use mail_handoff::MailHandoffChannel;
pub use web3forms::Web3FormsChannel;
