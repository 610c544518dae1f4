//! Ticket export port - the side-effecting "save this ticket" boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ticket::TicketDocument;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("export failed: {0}")]
    Io(String),
}

/// Where an exported ticket ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTicket {
    pub location: String,
    pub bytes: usize,
}

#[async_trait]
pub trait TicketExporter: Send + Sync {
    /// Saves `document` under `suggested_filename`.
    async fn download(
        &self,
        document: &TicketDocument,
        suggested_filename: &str,
    ) -> Result<ExportedTicket, ExportError>;
}
