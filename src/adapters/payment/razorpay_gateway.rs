//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Razorpay hosted checkout and
//! payment links.
//!
//! # Hosted checkout
//!
//! 1. Create an order (`POST /v1/orders`, amount in paise)
//! 2. Open the checkout UI for that order through the injected `CheckoutWindow`
//! 3. Verify `razorpay_signature` over `order_id|payment_id`
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Key secret held as `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret);
//! let gateway = RazorpayGateway::new(config, Arc::new(relay))?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::signature;
use crate::ports::{
    CheckoutOutcome, CheckoutPrefill, CheckoutSession, CheckoutWindow, LinkCallback,
    PaymentError, PaymentGateway, PaymentLinkRequest, PaymentRequest, WidgetResponse,
};

/// Paise per rupee.
const MINOR_UNITS_PER_RUPEE: u64 = 100;

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_live_... or rzp_test_...).
    key_id: String,

    /// Key secret used for API auth and signature verification.
    key_secret: SecretString,

    /// Base URL for the Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,

    /// Hosted payment link page.
    payment_link_base_url: String,

    currency: String,
    merchant_name: String,
    theme_color: String,

    /// Timeout for each API call.
    request_timeout: Duration,
}

impl RazorpayConfig {
    /// Create a configuration with Razorpay's public endpoints.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
            payment_link_base_url: "https://rzp.io/l/rapidophilia-trek".to_string(),
            currency: "INR".to_string(),
            merchant_name: "Rapidophilia Travel Solutions".to_string(),
            theme_color: "#7C3AED".to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_payment_link_base_url(mut self, url: impl Into<String>) -> Self {
        self.payment_link_base_url = url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_merchant(mut self, name: impl Into<String>, theme_color: impl Into<String>) -> Self {
        self.merchant_name = name.into();
        self.theme_color = theme_color.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
    notes: OrderNotes<'a>,
}

#[derive(Debug, Serialize)]
struct OrderNotes<'a> {
    customer_name: &'a str,
    customer_email: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: u64,
    currency: String,
}

/// Razorpay payment gateway adapter.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
    window: Arc<dyn CheckoutWindow>,
}

impl RazorpayGateway {
    /// Create a gateway that opens checkouts through `window`.
    pub fn new(config: RazorpayConfig, window: Arc<dyn CheckoutWindow>) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::ProviderUnavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            window,
        })
    }

    async fn create_order(&self, request: &PaymentRequest) -> Result<RazorpayOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.config.api_base_url.trim_end_matches('/'));
        let body = CreateOrderBody {
            amount: request.amount.saturating_mul(MINOR_UNITS_PER_RUPEE),
            currency: &self.config.currency,
            receipt: &request.reference,
            notes: OrderNotes {
                customer_name: &request.customer_name,
                customer_email: &request.customer_email,
                description: &request.description,
            },
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Razorpay order request failed");
                PaymentError::ProviderUnavailable(e.to_string())
            })?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), error = %error_text, "Razorpay create_order unavailable");
            return Err(PaymentError::ProviderUnavailable(format!(
                "Razorpay API error {}: {}",
                status, error_text
            )));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), error = %error_text, "Razorpay create_order rejected");
            return Err(PaymentError::Rejected(format!(
                "Razorpay API error {}: {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            PaymentError::ProviderUnavailable(format!("Failed to parse Razorpay response: {}", e))
        })
    }

    fn session_for(&self, request: &PaymentRequest, order: &RazorpayOrder) -> CheckoutSession {
        CheckoutSession {
            reference: request.reference.clone(),
            order_id: order.id.clone(),
            key_id: self.config.key_id.clone(),
            amount_minor: order.amount,
            currency: order.currency.clone(),
            merchant_name: self.config.merchant_name.clone(),
            description: request.description.clone(),
            prefill: CheckoutPrefill {
                name: request.customer_name.clone(),
                email: request.customer_email.clone(),
                contact: request.customer_phone.clone(),
            },
            theme_color: self.config.theme_color.clone(),
        }
    }

    fn secret(&self) -> &[u8] {
        self.config.key_secret.expose_secret().as_bytes()
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn load_and_open(&self, request: &PaymentRequest) -> Result<CheckoutOutcome, PaymentError> {
        if request.amount == 0 {
            return Err(PaymentError::Rejected("amount must be positive".to_string()));
        }

        let order = self.create_order(request).await?;
        tracing::info!(
            order_id = %order.id,
            reference = %request.reference,
            amount = order.amount,
            "Razorpay order created"
        );

        let session = self.session_for(request, &order);
        match self.window.open(&session).await? {
            WidgetResponse::Completed {
                order_id,
                payment_id,
                signature: provided,
            } => {
                if order_id != order.id {
                    tracing::warn!(expected = %order.id, received = %order_id, "Checkout answered for a different order");
                    return Err(PaymentError::Rejected("order mismatch".to_string()));
                }
                let payload = signature::checkout_payload(&order.id, &payment_id);
                if !signature::verify(self.secret(), &payload, &provided) {
                    tracing::warn!(order_id = %order.id, payment_id = %payment_id, "Invalid checkout signature");
                    return Err(PaymentError::Rejected("invalid payment signature".to_string()));
                }
                tracing::info!(order_id = %order.id, payment_id = %payment_id, "Checkout paid");
                Ok(CheckoutOutcome::Paid { payment_id })
            }
            WidgetResponse::Failed { reason } => {
                tracing::warn!(order_id = %order.id, reason = %reason, "Checkout payment failed");
                Err(PaymentError::Rejected(reason))
            }
            WidgetResponse::Dismissed => {
                tracing::info!(order_id = %order.id, "Checkout dismissed");
                Ok(CheckoutOutcome::Cancelled)
            }
        }
    }

    fn payment_link(&self, request: &PaymentLinkRequest) -> String {
        let mut params = vec![("amount", request.amount.to_string())];
        let optional = [
            ("name", &request.name),
            ("email", &request.email),
            ("contact", &request.contact),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((key, value.to_string()));
            }
        }

        match reqwest::Url::parse_with_params(&self.config.payment_link_base_url, &params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid payment link base URL");
                self.config.payment_link_base_url.clone()
            }
        }
    }

    fn verify_link_callback(&self, callback: &LinkCallback) -> Result<(), PaymentError> {
        let payload = signature::link_payload(
            &callback.link_id,
            &callback.reference_id,
            &callback.status,
            &callback.payment_id,
        );
        if signature::verify(self.secret(), &payload, &callback.signature) {
            Ok(())
        } else {
            tracing::warn!(link_id = %callback.link_id, payment_id = %callback.payment_id, "Invalid payment link signature");
            Err(PaymentError::Rejected("invalid payment link signature".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use axum::{routing::post, Json, Router};
    use tokio::net::TcpListener;

    const SECRET: &str = "test_secret";

    /// Checkout window that answers with a fixed response and records what it saw.
    struct ScriptedWindow {
        answer: Box<dyn Fn(&CheckoutSession) -> WidgetResponse + Send + Sync>,
        seen: Mutex<Vec<CheckoutSession>>,
    }

    #[async_trait]
    impl CheckoutWindow for ScriptedWindow {
        async fn open(&self, session: &CheckoutSession) -> Result<WidgetResponse, PaymentError> {
            self.seen.lock().unwrap().push(session.clone());
            Ok((self.answer)(session))
        }
    }

    fn window(
        answer: impl Fn(&CheckoutSession) -> WidgetResponse + Send + Sync + 'static,
    ) -> Arc<ScriptedWindow> {
        Arc::new(ScriptedWindow {
            answer: Box::new(answer),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Local stand-in for the orders API.
    async fn orders_api(status: u16) -> String {
        let app = Router::new().route(
            "/v1/orders",
            post(move |Json(body): Json<serde_json::Value>| async move {
                let code = axum::http::StatusCode::from_u16(status).unwrap();
                (
                    code,
                    Json(serde_json::json!({
                        "id": "order_test_1",
                        "amount": body["amount"],
                        "currency": body["currency"],
                        "receipt": body["receipt"],
                        "status": "created"
                    })),
                )
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: 6998,
            customer_name: "Asha Rawat".to_string(),
            customer_email: "asha@example.com".to_string(),
            customer_phone: "9876543210".to_string(),
            description: "Nag Tibba Trek - 2 participant(s)".to_string(),
            reference: "ref-1".to_string(),
        }
    }

    fn gateway(base_url: &str, window: Arc<ScriptedWindow>) -> RazorpayGateway {
        let config = RazorpayConfig::new("rzp_test_key", SECRET)
            .with_base_url(base_url)
            .with_request_timeout(Duration::from_secs(2));
        RazorpayGateway::new(config, window).unwrap()
    }

    fn signed_completion(session: &CheckoutSession) -> WidgetResponse {
        let payment_id = "pay_test_1".to_string();
        let signature = signature::sign(
            SECRET.as_bytes(),
            &signature::checkout_payload(&session.order_id, &payment_id),
        )
        .unwrap();
        WidgetResponse::Completed {
            order_id: session.order_id.clone(),
            payment_id,
            signature,
        }
    }

    #[tokio::test]
    async fn signed_completion_is_paid() {
        let base = orders_api(200).await;
        let window = window(signed_completion);
        let gateway = gateway(&base, window.clone());

        let outcome = gateway.load_and_open(&request()).await.unwrap();

        assert_eq!(
            outcome,
            CheckoutOutcome::Paid {
                payment_id: "pay_test_1".to_string()
            }
        );
        let seen = window.seen.lock().unwrap();
        assert_eq!(seen[0].amount_minor, 699_800);
        assert_eq!(seen[0].currency, "INR");
        assert_eq!(seen[0].reference, "ref-1");
        assert_eq!(seen[0].prefill.contact, "9876543210");
    }

    #[tokio::test]
    async fn bad_signature_is_rejected() {
        let base = orders_api(200).await;
        let gateway = gateway(
            &base,
            window(|session| WidgetResponse::Completed {
                order_id: session.order_id.clone(),
                payment_id: "pay_test_1".to_string(),
                signature: "00".repeat(32),
            }),
        );

        let err = gateway.load_and_open(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Rejected(_)));
    }

    #[tokio::test]
    async fn dismissal_is_cancelled() {
        let base = orders_api(200).await;
        let gateway = gateway(&base, window(|_| WidgetResponse::Dismissed));

        let outcome = gateway.load_and_open(&request()).await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::Cancelled);
    }

    #[tokio::test]
    async fn widget_failure_is_rejected() {
        let base = orders_api(200).await;
        let gateway = gateway(
            &base,
            window(|_| WidgetResponse::Failed {
                reason: "card declined".to_string(),
            }),
        );

        let err = gateway.load_and_open(&request()).await.unwrap_err();
        assert_eq!(err, PaymentError::Rejected("card declined".to_string()));
    }

    #[tokio::test]
    async fn client_error_is_rejected() {
        let base = orders_api(400).await;
        let gateway = gateway(&base, window(signed_completion));

        let err = gateway.load_and_open(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Rejected(_)));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let base = orders_api(503).await;
        let gateway = gateway(&base, window(signed_completion));

        let err = gateway.load_and_open(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_api_is_unavailable() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = gateway(&format!("http://{}", addr), window(signed_completion));
        let err = gateway.load_and_open(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::ProviderUnavailable(_)));
    }

    #[test]
    fn payment_link_encodes_prefill() {
        let gateway = gateway("http://unused", window(|_| WidgetResponse::Dismissed));
        let link = gateway.payment_link(&PaymentLinkRequest {
            amount: 6998,
            name: Some("Asha Rawat".to_string()),
            email: Some("asha@example.com".to_string()),
            contact: None,
        });

        assert_eq!(
            link,
            "https://rzp.io/l/rapidophilia-trek?amount=6998&name=Asha+Rawat&email=asha%40example.com"
        );
    }

    #[test]
    fn payment_link_is_deterministic() {
        let gateway = gateway("http://unused", window(|_| WidgetResponse::Dismissed));
        let request = PaymentLinkRequest {
            amount: 3499,
            ..Default::default()
        };
        assert_eq!(gateway.payment_link(&request), gateway.payment_link(&request));
        assert_eq!(
            gateway.payment_link(&request),
            "https://rzp.io/l/rapidophilia-trek?amount=3499"
        );
    }

    #[test]
    fn link_callback_signature_is_checked() {
        let gateway = gateway("http://unused", window(|_| WidgetResponse::Dismissed));
        let payload = signature::link_payload("plink_1", "RT1", "paid", "pay_1");
        let mut callback = LinkCallback {
            payment_id: "pay_1".to_string(),
            link_id: "plink_1".to_string(),
            reference_id: "RT1".to_string(),
            status: "paid".to_string(),
            signature: signature::sign(SECRET.as_bytes(), &payload).unwrap(),
        };

        assert!(gateway.verify_link_callback(&callback).is_ok());

        callback.status = "failed".to_string();
        assert!(gateway.verify_link_callback(&callback).is_err());
    }
}
