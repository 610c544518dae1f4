//! Data Transfer Objects for booking endpoints.
//!
//! Request DTOs are deserialized from the wire and converted into
//! application commands/queries. Response DTOs are serialized back.

use serde::{Deserialize, Serialize};

use crate::application::handlers::booking::{ConfirmPaymentQuery, PaymentLinkQuery};
use crate::application::handlers::ticket::IssuedTicket;
use crate::domain::booking::{BookingForm, BookingRecord, FieldErrors};
use crate::ports::{CheckoutSession, LinkCallback, WidgetResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Booking form as posted by the booking page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub trek_title: String,
    #[serde(default)]
    pub participants: u32,
    #[serde(default)]
    pub message: Option<String>,
    /// Also save the ticket to the export directory.
    #[serde(default)]
    pub export_ticket: bool,
}

impl CreateBookingRequest {
    pub fn to_form(&self) -> BookingForm {
        BookingForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            trek_title: self.trek_title.clone(),
            participants: self.participants,
            message: self.message.clone(),
        }
    }
}

/// Success answer from the checkout widget.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteCheckoutRequest {
    #[serde(alias = "razorpay_order_id")]
    pub order_id: String,
    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(alias = "razorpay_signature")]
    pub signature: String,
}

impl From<CompleteCheckoutRequest> for WidgetResponse {
    fn from(req: CompleteCheckoutRequest) -> Self {
        WidgetResponse::Completed {
            order_id: req.order_id,
            payment_id: req.payment_id,
            signature: req.signature,
        }
    }
}

/// Failure reported by the checkout widget.
#[derive(Debug, Clone, Deserialize)]
pub struct FailCheckoutRequest {
    #[serde(default)]
    pub reason: String,
}

/// Query string of `GET /api/payments/link`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLinkParams {
    pub participants: u32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl From<PaymentLinkParams> for PaymentLinkQuery {
    fn from(params: PaymentLinkParams) -> Self {
        PaymentLinkQuery {
            participants: params.participants,
            name: params.name,
            email: params.email,
            contact: params.contact,
        }
    }
}

/// Query string of `GET /api/payments/link-callback`.
///
/// Same field names the provider appends to the callback URL.
pub type LinkCallbackParams = LinkCallback;

/// Query string of `GET /payment-success`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentSuccessParams {
    pub payment_id: Option<String>,
    pub booking_id: Option<String>,
    pub status: Option<String>,
}

impl From<PaymentSuccessParams> for ConfirmPaymentQuery {
    fn from(params: PaymentSuccessParams) -> Self {
        ConfirmPaymentQuery {
            payment_id: params.payment_id,
            booking_id: params.booking_id,
            status: params.status,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Returned when a hosted checkout is open and waiting for the browser.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutStartedResponse {
    pub status: &'static str,
    pub reference: String,
    pub checkout: CheckoutSession,
    /// Where the widget answer must be posted.
    pub complete_url: String,
    pub dismiss_url: String,
}

impl From<CheckoutSession> for CheckoutStartedResponse {
    fn from(session: CheckoutSession) -> Self {
        let reference = session.reference.clone();
        Self {
            status: "checkout_open",
            complete_url: format!("/api/checkout/{}/complete", reference),
            dismiss_url: format!("/api/checkout/{}/dismiss", reference),
            reference,
            checkout: session,
        }
    }
}

/// Where the issued ticket can be fetched.
#[derive(Debug, Clone, Serialize)]
pub struct TicketSummary {
    pub file_name: String,
    pub download_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_to: Option<String>,
}

/// A paid and recorded booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmedResponse {
    pub status: &'static str,
    pub booking: BookingRecord,
    /// Absent when the ticket could not be produced; the booking still stands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_error: Option<String>,
}

impl BookingConfirmedResponse {
    pub fn new(booking: BookingRecord, ticket: Result<&IssuedTicket, String>) -> Self {
        let (ticket, ticket_error) = match ticket {
            Ok(issued) => (
                Some(TicketSummary {
                    file_name: issued.document.file_name.clone(),
                    download_url: format!("/api/bookings/{}/ticket", booking.booking_id()),
                    exported_to: issued
                        .exported
                        .as_ref()
                        .map(|exported| exported.location.clone()),
                }),
                None,
            ),
            Err(reason) => (None, Some(reason)),
        };
        Self {
            status: "confirmed",
            booking,
            ticket,
            ticket_error,
        }
    }
}

/// The traveler walked away from the checkout.
#[derive(Debug, Clone, Serialize)]
pub struct BookingCancelledResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl Default for BookingCancelledResponse {
    fn default() -> Self {
        Self {
            status: "cancelled",
            message: "Payment was cancelled. No booking was made.",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            fields: None,
            details: None,
        }
    }

    pub fn with_fields(message: impl Into<String>, fields: FieldErrors) -> Self {
        Self {
            fields: Some(fields),
            ..Self::new("VALIDATION_FAILED", message)
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(error_code, message)
        }
    }
}
