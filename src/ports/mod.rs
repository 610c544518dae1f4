//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the booking pipeline and the outside world. Adapters implement these ports.
//!
//! - `BookingRecordStore` - Persistence for paid bookings
//! - `PaymentGateway` / `CheckoutWindow` - Hosted checkout and payment links
//! - `NotificationChannel` - One way of delivering a booking notice
//! - `TicketExporter` - Saving a rendered ticket

mod booking_store;
mod notification_channel;
mod payment_gateway;
mod ticket_exporter;

pub use booking_store::{BookingRecordStore, StoreError};
pub use notification_channel::{ChannelError, ChannelReceipt, NotificationChannel};
pub use payment_gateway::{
    CheckoutOutcome, CheckoutPrefill, CheckoutSession, CheckoutWindow, LinkCallback,
    PaymentError, PaymentGateway, PaymentLinkRequest, PaymentRequest, WidgetResponse,
};
pub use ticket_exporter::{ExportError, ExportedTicket, TicketExporter};
