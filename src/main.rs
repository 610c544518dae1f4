//! Trek booking HTTP server.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trek_booking::adapters::http::{build_app, BookingAppState};
use trek_booking::adapters::http::booking::PendingBookings;
use trek_booking::adapters::notification::{
    FormspreeChannel, MailHandoffChannel, NotificationDispatcher, Web3FormsChannel,
};
use trek_booking::adapters::payment::{CheckoutRelay, RazorpayConfig, RazorpayGateway};
use trek_booking::adapters::storage::FileBookingStore;
use trek_booking::adapters::ticket::LocalTicketExporter;
use trek_booking::application::handlers::booking::{
    BookTrekHandler, ChargeBookingHandler, ConfirmPaymentHandler, PaymentLinkHandler,
};
use trek_booking::application::handlers::offer::GetOfferDeadlineHandler;
use trek_booking::application::handlers::ticket::{
    IssueTicketHandler, TicketSettings, VerifyBookingHandler,
};
use trek_booking::config::{AppConfig, NotificationConfig};
use trek_booking::domain::foundation::{BookingIdGenerator, Clock, SystemClock};
use trek_booking::domain::ticket::{QrEncoder, TicketRenderer};
use trek_booking::ports::{BookingRecordStore, PaymentGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        data_dir = %config.storage.data_dir.display(),
        collection = %config.storage.collection,
        live_payments = config.payment.is_live_mode(),
        "Configuration loaded"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let display_offset = config.booking.display_offset();
    let policy = config.booking.policy();

    let store: Arc<dyn BookingRecordStore> = Arc::new(FileBookingStore::new(
        &config.storage.data_dir,
        config.storage.collection.clone(),
    ));

    let checkouts = Arc::new(CheckoutRelay::new(Duration::from_secs(
        config.payment.checkout_timeout_secs,
    )));
    let razorpay = RazorpayConfig::new(
        config.payment.razorpay_key_id.clone(),
        config.payment.razorpay_key_secret.expose_secret().clone(),
    )
    .with_base_url(config.payment.api_base_url.clone())
    .with_payment_link_base_url(config.payment.payment_link_base_url.clone())
    .with_currency(config.payment.currency.clone())
    .with_merchant(
        config.payment.merchant_name.clone(),
        config.payment.theme_color.clone(),
    )
    .with_request_timeout(Duration::from_secs(config.payment.request_timeout_secs));
    let gateway: Arc<dyn PaymentGateway> =
        Arc::new(RazorpayGateway::new(razorpay, checkouts.clone())?);

    let dispatcher = Arc::new(build_dispatcher(
        &config.notification,
        &config.payment.merchant_name,
    )?);
    info!(channels = ?dispatcher.channel_names(), "Notification channels ready");

    let tickets = Arc::new(IssueTicketHandler::new(
        store.clone(),
        Arc::new(LocalTicketExporter::new(&config.ticket.export_dir)),
        QrEncoder::new(config.ticket.qr_style()?),
        TicketRenderer::new(config.booking.brand_prefix.clone(), config.ticket.contact()),
        TicketSettings {
            verification_base_url: config.ticket.verification_base_url.clone(),
            trek_date: config.ticket.trek_date.clone(),
            reporting_time: config.ticket.reporting_time.clone(),
            reporting_location: config.ticket.reporting_location.clone(),
        },
        clock.clone(),
        display_offset,
    ));

    let charge = Arc::new(ChargeBookingHandler::new(
        gateway.clone(),
        store.clone(),
        Arc::new(BookingIdGenerator::new(config.booking.id_prefix.clone())),
        clock.clone(),
        display_offset,
    ));

    let state = BookingAppState {
        book_trek: Arc::new(BookTrekHandler::new(
            policy,
            dispatcher,
            charge,
            tickets.clone(),
            clock.clone(),
            display_offset,
        )),
        confirm_payment: Arc::new(ConfirmPaymentHandler::new(store.clone())),
        payment_link: Arc::new(PaymentLinkHandler::new(gateway, policy)),
        issue_ticket: tickets,
        verify_booking: Arc::new(VerifyBookingHandler::new(
            store.clone(),
            config.ticket.verification_base_url.clone(),
        )),
        offer_deadline: Arc::new(GetOfferDeadlineHandler::new(
            clock,
            config.offer.anchor()?,
            display_offset,
        )),
        store,
        checkouts,
        pending: Arc::new(PendingBookings::default()),
    };

    let app = build_app(state, &config.server);
    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, "Trek booking server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Channels in fallback order: Web3Forms, Formspree, then the mail handoff
/// that always succeeds.
fn build_dispatcher(
    config: &NotificationConfig,
    brand_name: &str,
) -> Result<NotificationDispatcher, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(config.channel_timeout_secs);
    let recipients = config.recipients_list();
    let mut dispatcher = NotificationDispatcher::new(timeout);

    match &config.web3forms_access_key {
        Some(key) => {
            dispatcher = dispatcher.with_channel(Arc::new(Web3FormsChannel::new(
                config.web3forms_endpoint.clone(),
                key.clone(),
                recipients.clone(),
                timeout,
            )?));
        }
        None => warn!("No Web3Forms access key configured; skipping that channel"),
    }

    if let Some(endpoint) = &config.formspree_endpoint {
        dispatcher = dispatcher.with_channel(Arc::new(FormspreeChannel::new(
            endpoint.clone(),
            recipients.clone(),
            timeout,
        )?));
    }

    Ok(dispatcher.with_channel(Arc::new(MailHandoffChannel::new(recipients, brand_name))))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
