//! Local ticket exporter - saves rendered tickets into an export directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::ticket::TicketDocument;
use crate::ports::{ExportError, ExportedTicket, TicketExporter};

#[derive(Debug, Clone)]
pub struct LocalTicketExporter {
    export_dir: PathBuf,
}

impl LocalTicketExporter {
    pub fn new<P: AsRef<Path>>(export_dir: P) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Rejects names that would escape the export directory.
    fn check_file_name(name: &str) -> Result<(), ExportError> {
        if name.trim().is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
            || name.contains('\0')
        {
            return Err(ExportError::InvalidFileName(name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TicketExporter for LocalTicketExporter {
    async fn download(
        &self,
        document: &TicketDocument,
        suggested_filename: &str,
    ) -> Result<ExportedTicket, ExportError> {
        Self::check_file_name(suggested_filename)?;

        fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|e| ExportError::Io(format!("{}: {}", self.export_dir.display(), e)))?;

        let final_path = self.export_dir.join(suggested_filename);
        let temp_path = self.export_dir.join(format!("{}.tmp", suggested_filename));
        let bytes = document.html.as_bytes();

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| ExportError::Io(format!("{}: {}", temp_path.display(), e)))?;
        file.write_all(bytes)
            .await
            .map_err(|e| ExportError::Io(format!("{}: {}", temp_path.display(), e)))?;
        file.sync_all()
            .await
            .map_err(|e| ExportError::Io(format!("{}: {}", temp_path.display(), e)))?;
        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| ExportError::Io(format!("{}: {}", final_path.display(), e)))?;

        tracing::info!(path = %final_path.display(), bytes = bytes.len(), "Ticket exported");

        Ok(ExportedTicket {
            location: final_path.display().to_string(),
            bytes: bytes.len(),
        })
    }
}
