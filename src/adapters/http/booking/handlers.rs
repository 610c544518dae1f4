//! HTTP handlers for booking endpoints.
//!
//! These handlers connect Axum routes to the booking pipeline handlers.
//!
//! A hosted checkout spans two requests. `POST /api/bookings` starts the
//! pipeline on its own task and returns as soon as the checkout is open; the
//! browser later posts the widget answer to `/api/checkout/:reference/*`,
//! which resumes the pipeline and waits for its result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Json, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use uuid::Uuid;

use crate::adapters::payment::CheckoutRelay;
use crate::application::handlers::booking::{
    BookTrekCommand, BookTrekHandler, BookTrekResult, BookingError, BookingOutcome,
    ConfirmPaymentHandler, PaymentLinkError, PaymentLinkHandler,
};
use crate::application::handlers::offer::GetOfferDeadlineHandler;
use crate::application::handlers::ticket::{
    IssueTicketHandler, IssueTicketQuery, TicketError, VerifyBookingHandler, VerifyBookingQuery,
};
use crate::ports::{BookingRecordStore, CheckoutSession, PaymentError, WidgetResponse};

use super::dto::{
    BookingCancelledResponse, BookingConfirmedResponse, CheckoutStartedResponse,
    CompleteCheckoutRequest, CreateBookingRequest, ErrorResponse, FailCheckoutRequest,
    LinkCallbackParams, PaymentLinkParams, PaymentSuccessParams,
};

type PipelineTask = JoinHandle<Result<BookTrekResult, BookingError>>;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct BookingAppState {
    pub book_trek: Arc<BookTrekHandler>,
    pub confirm_payment: Arc<ConfirmPaymentHandler>,
    pub payment_link: Arc<PaymentLinkHandler>,
    pub issue_ticket: Arc<IssueTicketHandler>,
    pub verify_booking: Arc<VerifyBookingHandler>,
    pub offer_deadline: Arc<GetOfferDeadlineHandler>,
    pub store: Arc<dyn BookingRecordStore>,
    pub checkouts: Arc<CheckoutRelay>,
    pub pending: Arc<PendingBookings>,
}

/// Pipelines parked on an open checkout, keyed by checkout reference.
#[derive(Default)]
pub struct PendingBookings {
    tasks: Mutex<HashMap<String, PipelineTask>>,
}

impl PendingBookings {
    fn park(&self, reference: String, task: PipelineTask) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        // Checkouts nobody answered end on their own; drop them here.
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(reference, task);
    }

    fn take(&self, reference: &str) -> Option<PipelineTask> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(reference)
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a pipeline run ended, as seen by the HTTP surface.
enum Settled {
    Confirmed(BookingConfirmedResponse),
    Cancelled,
}

enum FirstEvent {
    Opened(Result<CheckoutSession, oneshot::error::RecvError>),
    Finished(Result<Result<BookTrekResult, BookingError>, JoinError>),
}

fn settle(
    joined: Result<Result<BookTrekResult, BookingError>, JoinError>,
) -> Result<Settled, BookingApiError> {
    let result = joined.map_err(|e| BookingApiError::Internal(e.to_string()))??;

    // The notification keeps running after the response is sent.
    drop(result.notification);

    Ok(match result.outcome {
        BookingOutcome::Cancelled => Settled::Cancelled,
        BookingOutcome::Confirmed { record, ticket } => {
            let ticket = ticket.as_ref().map_err(|e| {
                tracing::warn!(
                    booking_id = %record.booking_id(),
                    error = %e,
                    "Booking recorded without a ticket"
                );
                e.to_string()
            });
            Settled::Confirmed(BookingConfirmedResponse::new(record, ticket))
        }
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/bookings - Validate, notify and open the hosted checkout
pub async fn create_booking(
    State(state): State<BookingAppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Response, BookingApiError> {
    let reference = Uuid::new_v4().to_string();
    let opened = state.checkouts.expect(&reference);

    let handler = state.book_trek.clone();
    let command = BookTrekCommand {
        form: request.to_form(),
        reference: reference.clone(),
        export_ticket: request.export_ticket,
    };
    let mut task: PipelineTask = tokio::spawn(async move { handler.handle(command).await });

    let first = tokio::select! {
        opened = opened => FirstEvent::Opened(opened),
        joined = &mut task => FirstEvent::Finished(joined),
    };

    let joined = match first {
        FirstEvent::Opened(Ok(session)) => {
            tracing::info!(reference = %reference, order_id = %session.order_id, "Checkout opened");
            state.pending.park(reference, task);
            let body = CheckoutStartedResponse::from(session);
            return Ok((StatusCode::ACCEPTED, Json(body)).into_response());
        }
        FirstEvent::Opened(Err(_)) => task.await,
        FirstEvent::Finished(joined) => joined,
    };

    // The pipeline ended without waiting on the browser.
    state.checkouts.forget(&reference);
    match settle(joined)? {
        Settled::Confirmed(body) => Ok((StatusCode::CREATED, Json(body)).into_response()),
        Settled::Cancelled => Ok(Json(BookingCancelledResponse::default()).into_response()),
    }
}

/// POST /api/checkout/:reference/complete - Deliver a successful widget answer
pub async fn complete_checkout(
    State(state): State<BookingAppState>,
    Path(reference): Path<String>,
    Json(request): Json<CompleteCheckoutRequest>,
) -> Result<Response, BookingApiError> {
    let task = deliver(&state, &reference, request.into())?;
    match settle(task.await)? {
        Settled::Confirmed(body) => Ok((StatusCode::CREATED, Json(body)).into_response()),
        Settled::Cancelled => Err(BookingApiError::CheckoutCancelled(reference)),
    }
}

/// POST /api/checkout/:reference/fail - Deliver a failed widget answer
pub async fn fail_checkout(
    State(state): State<BookingAppState>,
    Path(reference): Path<String>,
    Json(request): Json<FailCheckoutRequest>,
) -> Result<Response, BookingApiError> {
    let task = deliver(
        &state,
        &reference,
        WidgetResponse::Failed {
            reason: request.reason,
        },
    )?;
    match settle(task.await)? {
        Settled::Confirmed(body) => Ok((StatusCode::CREATED, Json(body)).into_response()),
        Settled::Cancelled => Ok(Json(BookingCancelledResponse::default()).into_response()),
    }
}

/// POST /api/checkout/:reference/dismiss - The traveler closed the checkout
pub async fn dismiss_checkout(
    State(state): State<BookingAppState>,
    Path(reference): Path<String>,
) -> Result<Response, BookingApiError> {
    let task = deliver(&state, &reference, WidgetResponse::Dismissed)?;
    match settle(task.await)? {
        Settled::Confirmed(body) => Ok((StatusCode::CREATED, Json(body)).into_response()),
        Settled::Cancelled => Ok(Json(BookingCancelledResponse::default()).into_response()),
    }
}

fn deliver(
    state: &BookingAppState,
    reference: &str,
    response: WidgetResponse,
) -> Result<PipelineTask, BookingApiError> {
    if let Err(e) = state.checkouts.respond(reference, response) {
        // A checkout that already timed out still has a parked pipeline to report.
        tracing::debug!(reference = %reference, error = %e, "Checkout answer not delivered");
    }
    state
        .pending
        .take(reference)
        .ok_or_else(|| BookingApiError::CheckoutNotFound(reference.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/bookings/:booking_id - Stored booking record
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, BookingApiError> {
    let record = state
        .store
        .find(&booking_id)
        .await
        .ok_or(BookingApiError::BookingNotFound(booking_id))?;
    Ok(Json(record))
}

/// GET /api/bookings/:booking_id/ticket - Ticket re-rendered from the stored record
pub async fn download_ticket(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, BookingApiError> {
    let issued = state
        .issue_ticket
        .handle(IssueTicketQuery {
            booking_id,
            export: false,
        })
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", issued.document.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        issued.document.html,
    ))
}

/// GET /verify-booking/:booking_id - What a scanned ticket QR code opens
pub async fn verify_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> impl IntoResponse {
    Json(state.verify_booking.handle(VerifyBookingQuery { booking_id }).await)
}

/// GET /payment-success - Confirmation page data after a redirect
pub async fn payment_success(
    State(state): State<BookingAppState>,
    Query(params): Query<PaymentSuccessParams>,
) -> impl IntoResponse {
    Json(state.confirm_payment.handle(params.into()).await)
}

/// GET /api/payments/link - Payment link for out-of-band payment
pub async fn payment_link(
    State(state): State<BookingAppState>,
    Query(params): Query<PaymentLinkParams>,
) -> Result<impl IntoResponse, BookingApiError> {
    let link = state.payment_link.link(params.into())?;
    Ok(Json(link))
}

/// GET /api/payments/link-callback - Signed redirect from a completed payment link
pub async fn payment_link_callback(
    State(state): State<BookingAppState>,
    Query(callback): Query<LinkCallbackParams>,
) -> Result<impl IntoResponse, BookingApiError> {
    let target = state.payment_link.confirm_callback(&callback)?;
    Ok(Redirect::to(&target))
}

/// GET /api/offers/deadline - Next weekly deadline and countdown
pub async fn offer_deadline(State(state): State<BookingAppState>) -> impl IntoResponse {
    Json(state.offer_deadline.handle())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts pipeline errors to HTTP responses.
#[derive(Debug)]
pub enum BookingApiError {
    Booking(BookingError),
    Ticket(TicketError),
    PaymentLink(PaymentLinkError),
    BookingNotFound(String),
    CheckoutNotFound(String),
    CheckoutCancelled(String),
    Internal(String),
}

impl From<BookingError> for BookingApiError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl From<TicketError> for BookingApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(id) => Self::BookingNotFound(id),
            other => Self::Ticket(other),
        }
    }
}

impl From<PaymentLinkError> for BookingApiError {
    fn from(err: PaymentLinkError) -> Self {
        Self::PaymentLink(err)
    }
}

impl IntoResponse for BookingApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Booking(BookingError::InvalidInput(fields)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::with_fields("Please correct the highlighted fields", fields),
            ),
            Self::Booking(BookingError::ProviderUnavailable(msg)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(
                    "PAYMENT_PROVIDER_UNAVAILABLE",
                    format!("Payment could not be started: {}", msg),
                ),
            ),
            Self::Booking(BookingError::Rejected(msg)) => (
                StatusCode::PAYMENT_REQUIRED,
                ErrorResponse::new("PAYMENT_REJECTED", format!("Payment failed: {}", msg)),
            ),
            Self::Booking(BookingError::PaymentNotRecorded { payment_id }) => {
                tracing::error!(payment_id = %payment_id, "Responding with unrecorded payment");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(
                        "PAYMENT_NOT_RECORDED",
                        format!(
                            "Payment {} succeeded but the booking could not be saved. \
                             Please contact us with this payment id.",
                            payment_id
                        ),
                        serde_json::json!({ "payment_id": payment_id }),
                    ),
                )
            }
            Self::Ticket(err) => {
                tracing::error!(error = %err, "Ticket could not be produced");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("TICKET_UNAVAILABLE", err.to_string()),
                )
            }
            Self::PaymentLink(PaymentLinkError::InvalidParticipants { max }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    "VALIDATION_FAILED",
                    format!("participants must be between 1 and {}", max),
                ),
            ),
            Self::PaymentLink(PaymentLinkError::Payment(PaymentError::Rejected(msg))) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_SIGNATURE", msg),
            ),
            Self::PaymentLink(PaymentLinkError::Payment(PaymentError::ProviderUnavailable(msg))) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("PAYMENT_PROVIDER_UNAVAILABLE", msg),
            ),
            Self::BookingNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("BOOKING_NOT_FOUND", format!("Booking {} not found", id)),
            ),
            Self::CheckoutNotFound(reference) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(
                    "CHECKOUT_NOT_FOUND",
                    format!("No open checkout for reference {}", reference),
                ),
            ),
            Self::CheckoutCancelled(reference) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "CHECKOUT_CANCELLED",
                    format!("Checkout {} was already closed. No booking was made.", reference),
                ),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Booking pipeline task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
