//! Integration tests for the booking-to-ticket pipeline.
//!
//! These tests wire the real application handlers to in-memory storage, a
//! scripted payment gateway and recording notification channels:
//! 1. A paid booking is priced, recorded, ticketed and announced
//! 2. A cancelled checkout records nothing
//! 3. The notification chain stops at the first channel that succeeds

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use trek_booking::adapters::notification::NotificationDispatcher;
use trek_booking::adapters::payment::MockPaymentGateway;
use trek_booking::adapters::storage::{FileBookingStore, InMemoryBookingStore};
use trek_booking::adapters::ticket::LocalTicketExporter;
use trek_booking::application::handlers::booking::{
    BookTrekCommand, BookTrekHandler, BookingError, BookingOutcome, ChargeBookingHandler,
};
use trek_booking::application::handlers::ticket::{
    IssueTicketHandler, IssueTicketQuery, TicketSettings,
};
use trek_booking::domain::booking::{BookingForm, BookingPolicy, BookingRecord};
use trek_booking::domain::foundation::{display_offset, BookingIdGenerator, Clock, FixedClock};
use trek_booking::domain::notification::BookingNotice;
use trek_booking::domain::ticket::{ContactInfo, QrEncoder, QrStyle, TicketRenderer};
use trek_booking::ports::{
    BookingRecordStore, ChannelError, ChannelReceipt, NotificationChannel, PaymentError,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Channel that records every notice it sees and either accepts or refuses.
struct RecordingChannel {
    name: &'static str,
    accepts: bool,
    calls: AtomicU32,
}

impl RecordingChannel {
    fn new(name: &'static str, accepts: bool) -> Arc<Self> {
        Arc::new(Self {
            name,
            accepts,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn deliver(&self, _notice: &BookingNotice) -> Result<ChannelReceipt, ChannelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.accepts {
            Ok(ChannelReceipt {
                confirmed: true,
                message: format!("{} accepted", self.name),
                compose_links: Vec::new(),
            })
        } else {
            Err(ChannelError::Status(500))
        }
    }
}

struct Pipeline {
    handler: BookTrekHandler,
    tickets: Arc<IssueTicketHandler>,
    store: Arc<dyn BookingRecordStore>,
    gateway: MockPaymentGateway,
    channels: Vec<Arc<RecordingChannel>>,
    _export_dir: TempDir,
}

fn policy() -> BookingPolicy {
    BookingPolicy {
        price_per_person: 3499,
        max_participants: 15,
    }
}

fn pipeline(
    store: Arc<dyn BookingRecordStore>,
    gateway: MockPaymentGateway,
    channels: Vec<Arc<RecordingChannel>>,
) -> Pipeline {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(
        Utc.with_ymd_and_hms(2026, 10, 18, 6, 30, 0).unwrap(),
    ));
    let offset = display_offset(330);
    let export_dir = TempDir::new().unwrap();

    let mut dispatcher = NotificationDispatcher::new(Duration::from_secs(2));
    for channel in &channels {
        dispatcher = dispatcher.with_channel(channel.clone());
    }

    let tickets = Arc::new(IssueTicketHandler::new(
        store.clone(),
        Arc::new(LocalTicketExporter::new(export_dir.path())),
        QrEncoder::new(QrStyle::default()),
        TicketRenderer::new(
            "Rapidophilia",
            ContactInfo {
                phone: "+91 98765 43210".to_string(),
                email: "rapidophiliatravelsolutions@gmail.com".to_string(),
                address: "Dehradun, Uttarakhand, India".to_string(),
            },
        ),
        TicketSettings {
            verification_base_url: "https://rapidophilia.example".to_string(),
            trek_date: None,
            reporting_time: "06:00 AM".to_string(),
            reporting_location: "Dehradun Railway Station".to_string(),
        },
        clock.clone(),
        offset,
    ));

    let charge = Arc::new(ChargeBookingHandler::new(
        Arc::new(gateway.clone()),
        store.clone(),
        Arc::new(BookingIdGenerator::new("RT")),
        clock.clone(),
        offset,
    ));

    let handler = BookTrekHandler::new(
        policy(),
        Arc::new(dispatcher),
        charge,
        tickets.clone(),
        clock,
        offset,
    );

    Pipeline {
        handler,
        tickets,
        store,
        gateway,
        channels,
        _export_dir: export_dir,
    }
}

fn asha_form() -> BookingForm {
    BookingForm {
        first_name: "Asha".to_string(),
        last_name: "Rawat".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        trek_title: "Nag Tibba Trek".to_string(),
        participants: 2,
        message: None,
    }
}

fn command(form: BookingForm) -> BookTrekCommand {
    BookTrekCommand {
        form,
        reference: "ref-1".to_string(),
        export_ticket: false,
    }
}

fn is_reference_id(id: &str) -> bool {
    id.len() == 11
        && id.starts_with("RT")
        && id[2..8].chars().all(|c| c.is_ascii_digit())
        && id[8..].chars().all(|c| c.is_ascii_alphanumeric())
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn paid_booking_is_recorded_ticketed_and_announced() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::paying("pay_A"),
        vec![RecordingChannel::new("primary", true)],
    );

    let result = p.handler.handle(command(asha_form())).await.unwrap();

    let (record, ticket) = match result.outcome {
        BookingOutcome::Confirmed { record, ticket } => (record, ticket.unwrap()),
        BookingOutcome::Cancelled => panic!("expected a confirmed booking"),
    };
    assert_eq!(record.amount(), 6998);
    assert_eq!(record.full_name(), "Asha Rawat");
    assert_eq!(record.payment_id(), "pay_A");
    assert!(is_reference_id(record.booking_id().as_str()), "bad id {}", record.booking_id());

    let charged = p.gateway.requests();
    assert_eq!(charged.len(), 1);
    assert_eq!(charged[0].amount, 6998);

    let html = &ticket.document.html;
    assert!(html.contains(record.booking_id().as_str()));
    assert!(html.contains("Nag Tibba Trek"));
    assert!(html.contains("data:image/png;base64,"));

    let dispatch = result.notification.outcome().await.unwrap();
    assert!(dispatch.success);
    assert_eq!(dispatch.channel_name, "primary");
}

#[tokio::test]
async fn stored_booking_is_found_by_its_id() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::paying("pay_B"),
        vec![RecordingChannel::new("primary", true)],
    );

    let result = p.handler.handle(command(asha_form())).await.unwrap();
    let BookingOutcome::Confirmed { record, .. } = result.outcome else {
        panic!("expected a confirmed booking");
    };

    let found = p.store.find(record.booking_id().as_str()).await;
    assert_eq!(found, Some(record.clone()));

    let reissued = p
        .tickets
        .handle(IssueTicketQuery {
            booking_id: record.booking_id().to_string(),
            export: false,
        })
        .await
        .unwrap();
    assert!(reissued.document.file_name.contains(record.booking_id().as_str()));
}

#[tokio::test]
async fn cancelled_checkout_records_nothing_but_still_notifies() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::cancelling(),
        vec![RecordingChannel::new("primary", true)],
    );

    let result = p.handler.handle(command(asha_form())).await.unwrap();
    assert!(matches!(result.outcome, BookingOutcome::Cancelled));
    assert!(result.notification.outcome().await.unwrap().success);
    assert_eq!(p.channels[0].calls(), 1);
    assert_eq!(p.store.find("RT000000AAA").await, None);
}

#[tokio::test]
async fn invalid_form_never_reaches_payment_or_notification() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::paying("pay_C"),
        vec![RecordingChannel::new("primary", true)],
    );

    let form = BookingForm {
        email: "not-an-email".to_string(),
        participants: 0,
        ..asha_form()
    };
    let err = p.handler.handle(command(form)).await.unwrap_err();

    let BookingError::InvalidInput(fields) = err else {
        panic!("expected field errors");
    };
    assert!(fields.get("email").is_some());
    assert!(fields.get("participants").is_some());
    assert!(p.gateway.requests().is_empty());
    assert_eq!(p.channels[0].calls(), 0);
}

#[tokio::test]
async fn provider_outage_surfaces_as_unavailable() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::failing(PaymentError::ProviderUnavailable("timeout".to_string())),
        vec![RecordingChannel::new("primary", true)],
    );

    let err = p.handler.handle(command(asha_form())).await.unwrap_err();
    assert!(matches!(err, BookingError::ProviderUnavailable(_)));
}

#[tokio::test]
async fn notification_stops_at_first_accepting_channel() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::cancelling(),
        vec![
            RecordingChannel::new("web3forms", true),
            RecordingChannel::new("formspree", true),
        ],
    );

    let result = p.handler.handle(command(asha_form())).await.unwrap();
    let dispatch = result.notification.outcome().await.unwrap();

    assert!(dispatch.success);
    assert_eq!(dispatch.channel, 0);
    assert_eq!(p.channels[0].calls(), 1);
    assert_eq!(p.channels[1].calls(), 0);
}

#[tokio::test]
async fn notification_falls_back_past_failing_channels() {
    let p = pipeline(
        Arc::new(InMemoryBookingStore::new()),
        MockPaymentGateway::cancelling(),
        vec![
            RecordingChannel::new("web3forms", false),
            RecordingChannel::new("formspree", true),
            RecordingChannel::new("mail_handoff", true),
        ],
    );

    let result = p.handler.handle(command(asha_form())).await.unwrap();
    let dispatch = result.notification.outcome().await.unwrap();

    assert_eq!(dispatch.channel_name, "formspree");
    assert_eq!(dispatch.failures.len(), 1);
    assert_eq!(p.channels[2].calls(), 0);
}

#[tokio::test]
async fn bookings_survive_a_store_reopen() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn BookingRecordStore> =
        Arc::new(FileBookingStore::new(dir.path(), "rapidophilia_bookings"));
    let p = pipeline(
        store,
        MockPaymentGateway::paying("pay_D"),
        vec![RecordingChannel::new("primary", true)],
    );

    let result = p.handler.handle(command(asha_form())).await.unwrap();
    let BookingOutcome::Confirmed { record, .. } = result.outcome else {
        panic!("expected a confirmed booking");
    };

    let reopened = FileBookingStore::new(dir.path(), "rapidophilia_bookings");
    let found: Option<BookingRecord> = reopened.find(record.booking_id().as_str()).await;
    assert_eq!(found.map(|r| r.payment_id().to_string()), Some("pay_D".to_string()));
}
