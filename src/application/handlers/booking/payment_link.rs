//! Payment-link handlers.
//!
//! Payment links complete out of band, so no booking record is ever created
//! from them. The callback is only trusted after its signature checks out.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::booking::{total_price, BookingPolicy};
use crate::ports::{LinkCallback, PaymentError, PaymentGateway, PaymentLinkRequest};

/// Query for a prefilled payment link.
#[derive(Debug, Clone, Default)]
pub struct PaymentLinkQuery {
    pub participants: u32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentLink {
    pub amount: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentLinkError {
    #[error("participants must be between 1 and {max}")]
    InvalidParticipants { max: u32 },

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

pub struct PaymentLinkHandler {
    gateway: Arc<dyn PaymentGateway>,
    policy: BookingPolicy,
}

impl PaymentLinkHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, policy: BookingPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn link(&self, query: PaymentLinkQuery) -> Result<PaymentLink, PaymentLinkError> {
        if query.participants == 0 || query.participants > self.policy.max_participants {
            return Err(PaymentLinkError::InvalidParticipants {
                max: self.policy.max_participants,
            });
        }

        let amount = total_price(self.policy.price_per_person, query.participants);
        let url = self.gateway.payment_link(&PaymentLinkRequest {
            amount,
            name: query.name,
            email: query.email,
            contact: query.contact,
        });

        Ok(PaymentLink { amount, url })
    }

    /// Verifies a payment-link callback and returns the confirmation route
    /// to redirect to.
    pub fn confirm_callback(&self, callback: &LinkCallback) -> Result<String, PaymentLinkError> {
        self.gateway.verify_link_callback(callback).map_err(|e| {
            tracing::warn!(
                payment_id = %callback.payment_id,
                link_id = %callback.link_id,
                error = %e,
                "Payment link callback rejected"
            );
            e
        })?;

        tracing::info!(
            payment_id = %callback.payment_id,
            link_id = %callback.link_id,
            status = %callback.status,
            "Payment link callback verified"
        );

        Ok(format!(
            "/payment-success?payment_id={}&status={}",
            urlencoding::encode(&callback.payment_id),
            urlencoding::encode(&callback.status)
        ))
    }
}
