//! Axum router configuration for booking endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    complete_checkout, create_booking, dismiss_checkout, download_ticket, fail_checkout,
    get_booking, offer_deadline, payment_link, payment_link_callback, payment_success,
    verify_booking, BookingAppState,
};

/// Routes mounted under `/api`.
///
/// # Routes
/// - `POST /bookings` - Validate, notify and open the hosted checkout
/// - `GET /bookings/:booking_id` - Stored booking record
/// - `GET /bookings/:booking_id/ticket` - Ticket download
/// - `POST /checkout/:reference/complete` - Widget reported success
/// - `POST /checkout/:reference/fail` - Widget reported a failed payment
/// - `POST /checkout/:reference/dismiss` - Widget was closed
/// - `GET /payments/link` - Payment link for out-of-band payment
/// - `GET /payments/link-callback` - Signed payment link redirect
/// - `GET /offers/deadline` - Weekly offer countdown
pub fn api_routes() -> Router<BookingAppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/:booking_id", get(get_booking))
        .route("/bookings/:booking_id/ticket", get(download_ticket))
        .route("/checkout/:reference/complete", post(complete_checkout))
        .route("/checkout/:reference/fail", post(fail_checkout))
        .route("/checkout/:reference/dismiss", post(dismiss_checkout))
        .route("/payments/link", get(payment_link))
        .route("/payments/link-callback", get(payment_link_callback))
        .route("/offers/deadline", get(offer_deadline))
}

/// Routes reached from outside the booking page: ticket QR codes and the
/// payment confirmation redirect.
pub fn public_routes() -> Router<BookingAppState> {
    Router::new()
        .route("/verify-booking/:booking_id", get(verify_booking))
        .route("/payment-success", get(payment_success))
}

/// Create the complete booking router.
///
/// ```ignore
/// let app = booking_router().with_state(app_state);
/// ```
pub fn booking_router() -> Router<BookingAppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(public_routes())
}
