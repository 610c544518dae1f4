//! Mock payment gateway for testing.
//!
//! Provides a scripted implementation of `PaymentGateway` for unit and
//! integration tests. Supports:
//! - Queued checkout outcomes and errors
//! - Call tracking
//! - Accept-all or reject-all link callback verification

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CheckoutOutcome, LinkCallback, PaymentError, PaymentGateway, PaymentLinkRequest,
    PaymentRequest,
};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::paying("PAY123");
/// let outcome = mock.load_and_open(&request).await?;
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Outcomes returned in order; when empty the checkout is cancelled.
    outcomes: VecDeque<Result<CheckoutOutcome, PaymentError>>,

    /// Every checkout request seen.
    requests: Vec<PaymentRequest>,

    reject_link_callbacks: bool,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose next checkout is paid with `payment_id`.
    pub fn paying(payment_id: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_outcome(Ok(CheckoutOutcome::Paid {
            payment_id: payment_id.into(),
        }));
        mock
    }

    /// A gateway whose next checkout is cancelled.
    pub fn cancelling() -> Self {
        let mock = Self::new();
        mock.push_outcome(Ok(CheckoutOutcome::Cancelled));
        mock
    }

    /// A gateway whose next checkout fails with `error`.
    pub fn failing(error: PaymentError) -> Self {
        let mock = Self::new();
        mock.push_outcome(Err(error));
        mock
    }

    /// Queue another checkout result.
    pub fn push_outcome(&self, outcome: Result<CheckoutOutcome, PaymentError>) {
        self.state().outcomes.push_back(outcome);
    }

    /// Fail every link callback verification.
    pub fn reject_link_callbacks(&self) {
        self.state().reject_link_callbacks = true;
    }

    /// Checkout requests received so far.
    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.state().requests.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn load_and_open(&self, request: &PaymentRequest) -> Result<CheckoutOutcome, PaymentError> {
        let mut state = self.state();
        state.requests.push(request.clone());
        state
            .outcomes
            .pop_front()
            .unwrap_or(Ok(CheckoutOutcome::Cancelled))
    }

    fn payment_link(&self, request: &PaymentLinkRequest) -> String {
        format!("https://pay.example/link?amount={}", request.amount)
    }

    fn verify_link_callback(&self, _callback: &LinkCallback) -> Result<(), PaymentError> {
        if self.state().reject_link_callbacks {
            Err(PaymentError::Rejected("invalid payment link signature".to_string()))
        } else {
            Ok(())
        }
    }
}
