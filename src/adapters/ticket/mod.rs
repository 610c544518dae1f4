//! Ticket export adapters.

mod local_exporter;

pub use local_exporter::LocalTicketExporter;
