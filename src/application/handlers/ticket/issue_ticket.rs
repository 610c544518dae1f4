//! IssueTicketHandler - Builds the printable ticket for a stored booking.
//!
//! Tickets are never persisted. They are recomputed from the record each
//! time, so a failed render or export can simply be retried later.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveTime, TimeZone};
use thiserror::Error;

use crate::domain::booking::BookingRecord;
use crate::domain::foundation::Clock;
use crate::domain::offer::weekend_trip_window;
use crate::domain::ticket::{EncodeError, QrEncoder, TicketData, TicketDocument, TicketRenderer};
use crate::ports::{BookingRecordStore, ExportedTicket, TicketExporter};

/// Display details printed on every ticket.
#[derive(Debug, Clone)]
pub struct TicketSettings {
    pub verification_base_url: String,
    /// Fixed trek date; when absent the weekend window following the
    /// booking day is shown.
    pub trek_date: Option<String>,
    pub reporting_time: String,
    pub reporting_location: String,
}

/// Query to issue the ticket for a stored booking.
#[derive(Debug, Clone)]
pub struct IssueTicketQuery {
    pub booking_id: String,
    /// Also save the document through the ticket exporter.
    pub export: bool,
}

#[derive(Debug, Clone)]
pub struct IssuedTicket {
    pub document: TicketDocument,
    /// Present when the document was exported.
    pub exported: Option<ExportedTicket>,
}

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("booking {0} not found")]
    NotFound(String),

    #[error("ticket could not be encoded: {0}")]
    Encoding(#[from] EncodeError),
}

pub struct IssueTicketHandler {
    store: Arc<dyn BookingRecordStore>,
    exporter: Arc<dyn TicketExporter>,
    encoder: QrEncoder,
    renderer: TicketRenderer,
    settings: TicketSettings,
    clock: Arc<dyn Clock>,
    display_offset: FixedOffset,
}

impl IssueTicketHandler {
    pub fn new(
        store: Arc<dyn BookingRecordStore>,
        exporter: Arc<dyn TicketExporter>,
        encoder: QrEncoder,
        renderer: TicketRenderer,
        settings: TicketSettings,
        clock: Arc<dyn Clock>,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            store,
            exporter,
            encoder,
            renderer,
            settings,
            clock,
            display_offset,
        }
    }

    pub async fn handle(&self, query: IssueTicketQuery) -> Result<IssuedTicket, TicketError> {
        let record = self
            .store
            .find(&query.booking_id)
            .await
            .ok_or_else(|| TicketError::NotFound(query.booking_id.clone()))?;

        self.issue(&record, query.export).await
    }

    /// Renders the ticket for a record already in hand.
    ///
    /// Export failures are logged and leave `exported` empty; only encoding
    /// failures are returned.
    pub async fn issue(&self, record: &BookingRecord, export: bool) -> Result<IssuedTicket, TicketError> {
        let document = self.render(record).map_err(|e| {
            tracing::warn!(booking_id = %record.booking_id(), error = %e, "Ticket encoding failed");
            e
        })?;

        let exported = if export {
            match self.exporter.download(&document, &document.file_name).await {
                Ok(exported) => Some(exported),
                Err(e) => {
                    tracing::warn!(
                        booking_id = %record.booking_id(),
                        error = %e,
                        "Ticket export failed"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(IssuedTicket { document, exported })
    }

    fn render(&self, record: &BookingRecord) -> Result<TicketDocument, TicketError> {
        let qr_image = self
            .encoder
            .encode(record, &self.settings.verification_base_url)?;

        let data = TicketData {
            record: record.clone(),
            qr_image,
            trek_date: self.trek_date(record),
            reporting_time: self.settings.reporting_time.clone(),
            reporting_location: self.settings.reporting_location.clone(),
        };

        Ok(self.renderer.render(&data))
    }

    /// The configured date, or the weekend after the day the booking was
    /// made. Derived from the record so every render of a booking agrees.
    fn trek_date(&self, record: &BookingRecord) -> String {
        if let Some(date) = &self.settings.trek_date {
            return date.clone();
        }

        let booked_at = record.booked_on().and_then(|day| {
            self.display_offset
                .from_local_datetime(&day.and_time(NaiveTime::MIN))
                .single()
        });
        match booked_at {
            Some(start_of_day) => weekend_trip_window(&start_of_day).label(),
            None => {
                tracing::warn!(
                    booking_id = %record.booking_id(),
                    booking_date = record.booking_date(),
                    "Unreadable booking date, using the current weekend"
                );
                let now = self.clock.now().with_timezone(&self.display_offset);
                weekend_trip_window(&now).label()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryBookingStore;
    use crate::domain::booking::{BookingForm, BookingPolicy};
    use crate::domain::foundation::{display_offset, BookingId, FixedClock};
    use crate::domain::ticket::{ContactInfo, QrStyle};
    use crate::ports::ExportError;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingExporter {
        saved: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl TicketExporter for RecordingExporter {
        async fn download(
            &self,
            document: &TicketDocument,
            suggested_filename: &str,
        ) -> Result<ExportedTicket, ExportError> {
            if self.fail {
                return Err(ExportError::Io("read-only".to_string()));
            }
            self.saved.lock().unwrap().push(suggested_filename.to_string());
            Ok(ExportedTicket {
                location: format!("/tickets/{}", suggested_filename),
                bytes: document.html.len(),
            })
        }
    }

    fn record() -> BookingRecord {
        let intent = BookingForm {
            first_name: "Asha".to_string(),
            last_name: "Rawat".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            trek_title: "Kedarkantha Trek".to_string(),
            participants: 3,
            message: None,
        }
        .validate(&BookingPolicy {
            price_per_person: 3499,
            max_participants: 15,
        })
        .unwrap();
        BookingRecord::create(BookingId::new("RT123456ABC"), &intent, "PAY123", "18/10/2026")
    }

    fn settings(trek_date: Option<&str>) -> TicketSettings {
        TicketSettings {
            verification_base_url: "https://rapidophilia.example".to_string(),
            trek_date: trek_date.map(str::to_string),
            reporting_time: "06:00 AM".to_string(),
            reporting_location: "Dehradun Railway Station".to_string(),
        }
    }

    async fn handler(
        exporter: Arc<RecordingExporter>,
        trek_date: Option<&str>,
    ) -> IssueTicketHandler {
        handler_at(exporter, trek_date, Utc.with_ymd_and_hms(2026, 10, 18, 4, 30, 0).unwrap()).await
    }

    async fn handler_at(
        exporter: Arc<RecordingExporter>,
        trek_date: Option<&str>,
        now: chrono::DateTime<Utc>,
    ) -> IssueTicketHandler {
        let store = Arc::new(InMemoryBookingStore::new());
        store.store(&record()).await.unwrap();
        IssueTicketHandler::new(
            store,
            exporter,
            QrEncoder::new(QrStyle::default()),
            TicketRenderer::new(
                "Rapidophilia",
                ContactInfo {
                    phone: "+91 00000 00000".to_string(),
                    email: "trek@example.com".to_string(),
                    address: "Dehradun".to_string(),
                },
            ),
            settings(trek_date),
            Arc::new(FixedClock::at(now)),
            display_offset(330),
        )
    }

    fn query(export: bool) -> IssueTicketQuery {
        IssueTicketQuery {
            booking_id: "RT123456ABC".to_string(),
            export,
        }
    }

    #[tokio::test]
    async fn renders_and_exports_stored_booking() {
        let exporter = Arc::new(RecordingExporter::default());
        let issued = handler(exporter.clone(), Some("25 Oct 2026"))
            .await
            .handle(query(true))
            .await
            .unwrap();

        assert!(issued.document.html.contains("RT123456ABC"));
        assert!(issued.document.html.contains("Kedarkantha Trek"));
        assert!(issued.document.html.contains("25 Oct 2026"));
        assert_eq!(
            *exporter.saved.lock().unwrap(),
            vec!["Rapidophilia_Trek_Ticket_RT123456ABC.html".to_string()]
        );
        assert!(issued.exported.is_some());
    }

    #[tokio::test]
    async fn default_trek_date_is_weekend_window() {
        let issued = handler(Arc::new(RecordingExporter::default()), None)
            .await
            .handle(query(false))
            .await
            .unwrap();

        assert!(issued.document.html.contains("Fri, 23 Oct 9pm – Sun, 25 Oct 9pm"));
        assert!(issued.exported.is_none());
    }

    #[tokio::test]
    async fn reissued_ticket_matches_first_issue_a_week_later() {
        let first = handler_at(
            Arc::new(RecordingExporter::default()),
            None,
            Utc.with_ymd_and_hms(2026, 10, 18, 4, 30, 0).unwrap(),
        )
        .await
        .handle(query(false))
        .await
        .unwrap();
        let later = handler_at(
            Arc::new(RecordingExporter::default()),
            None,
            Utc.with_ymd_and_hms(2026, 10, 28, 4, 30, 0).unwrap(),
        )
        .await
        .handle(query(false))
        .await
        .unwrap();

        assert_eq!(first.document, later.document);
        assert!(later.document.html.contains("Fri, 23 Oct 9pm – Sun, 25 Oct 9pm"));
    }

    #[tokio::test]
    async fn export_failure_still_returns_document() {
        let exporter = Arc::new(RecordingExporter {
            fail: true,
            ..Default::default()
        });
        let issued = handler(exporter, None).await.handle(query(true)).await.unwrap();

        assert!(issued.exported.is_none());
        assert!(!issued.document.html.is_empty());
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let err = handler(Arc::new(RecordingExporter::default()), None)
            .await
            .handle(IssueTicketQuery {
                booking_id: "RT000000XXX".to_string(),
                export: false,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TicketError::NotFound(id) if id == "RT000000XXX"));
    }
}
