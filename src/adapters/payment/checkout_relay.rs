//! In-process checkout window for the HTTP surface.
//!
//! The browser runs the provider's checkout UI, so the gateway cannot open
//! it directly. The relay bridges the two halves of the flow:
//!
//! 1. The booking request registers interest with [`CheckoutRelay::expect`]
//!    and hands the session to the browser once the order exists.
//! 2. The browser later posts the UI's answer, delivered with
//!    [`CheckoutRelay::respond`], which resumes the waiting gateway call.
//!
//! A checkout that is never answered within the timeout is reported as
//! dismissed.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::ports::{CheckoutSession, CheckoutWindow, PaymentError, WidgetResponse};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("no open checkout for reference {0}")]
    UnknownCheckout(String),
}

#[derive(Default)]
struct PendingCheckout {
    opened: Option<oneshot::Sender<CheckoutSession>>,
    answer: Option<oneshot::Sender<WidgetResponse>>,
}

/// Checkout window backed by in-process channels.
pub struct CheckoutRelay {
    pending: Mutex<HashMap<String, PendingCheckout>>,
    timeout: Duration,
}

impl CheckoutRelay {
    /// Create a relay that waits at most `timeout` for each checkout answer.
    pub fn new(timeout: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Registers interest in the checkout for `reference`.
    ///
    /// The receiver yields the session once the gateway opens it, or closes
    /// if the booking fails before a checkout is opened.
    pub fn expect(&self, reference: &str) -> oneshot::Receiver<CheckoutSession> {
        let (tx, rx) = oneshot::channel();
        self.lock().entry(reference.to_string()).or_default().opened = Some(tx);
        rx
    }

    /// Delivers the checkout UI's answer for `reference`.
    pub fn respond(&self, reference: &str, response: WidgetResponse) -> Result<(), RelayError> {
        let sender = self
            .lock()
            .get_mut(reference)
            .and_then(|pending| pending.answer.take())
            .ok_or_else(|| RelayError::UnknownCheckout(reference.to_string()))?;

        sender
            .send(response)
            .map_err(|_| RelayError::UnknownCheckout(reference.to_string()))
    }

    /// Drops any state held for `reference`.
    pub fn forget(&self, reference: &str) {
        self.lock().remove(reference);
    }

    /// Whether a checkout for `reference` is waiting for an answer.
    pub fn is_open(&self, reference: &str) -> bool {
        self.lock()
            .get(reference)
            .map_or(false, |pending| pending.answer.is_some())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PendingCheckout>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CheckoutWindow for CheckoutRelay {
    async fn open(&self, session: &CheckoutSession) -> Result<WidgetResponse, PaymentError> {
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.lock();
            let entry = pending.entry(session.reference.clone()).or_default();
            entry.answer = Some(tx);
            if let Some(opened) = entry.opened.take() {
                // The requester may have gone away; the checkout still waits.
                let _ = opened.send(session.clone());
            }
        }

        let response = match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => WidgetResponse::Dismissed,
            Err(_) => {
                tracing::info!(
                    reference = %session.reference,
                    order_id = %session.order_id,
                    timeout_secs = self.timeout.as_secs(),
                    "Checkout abandoned"
                );
                WidgetResponse::Dismissed
            }
        };

        self.forget(&session.reference);
        Ok(response)
    }
}
