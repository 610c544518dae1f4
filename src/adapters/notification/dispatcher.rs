//! Notification Dispatcher - Ordered failover across notification channels.
//!
//! Channels are tried strictly in order, one at a time. The first channel
//! that succeeds ends the walk; later channels are never attempted. Every
//! attempt is bounded by the channel timeout, and no channel failure escapes
//! `notify` as an error.
//!
//! # Example
//!
//! ```ignore
//! let dispatcher = NotificationDispatcher::new(Duration::from_secs(10))
//!     .with_channel(Arc::new(web3forms))
//!     .with_channel(Arc::new(formspree))
//!     .with_channel(Arc::new(MailHandoffChannel::new(recipients)));
//!
//! let result = dispatcher.notify(&notice).await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::domain::notification::{BookingNotice, ChannelAttempt, DispatchResult};
use crate::ports::{ChannelError, NotificationChannel};

/// Walks an ordered chain of notification channels.
#[derive(Clone)]
pub struct NotificationDispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
    channel_timeout: Duration,
}

impl NotificationDispatcher {
    /// Creates a dispatcher with no channels.
    pub fn new(channel_timeout: Duration) -> Self {
        Self {
            channels: Vec::new(),
            channel_timeout,
        }
    }

    /// Appends a channel to the end of the chain.
    pub fn with_channel(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Channel names in attempt order.
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Delivers `notice` through the first channel that accepts it.
    pub async fn notify(&self, notice: &BookingNotice) -> DispatchResult {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut failures = Vec::new();

        for (index, channel) in self.channels.iter().enumerate() {
            let outcome = match tokio::time::timeout(self.channel_timeout, channel.deliver(notice)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ChannelError::Timeout(self.channel_timeout.as_secs())),
            };

            match outcome {
                Ok(receipt) => {
                    tracing::info!(
                        request_id = %request_id,
                        channel = channel.name(),
                        index,
                        confirmed = receipt.confirmed,
                        "Booking notification dispatched"
                    );
                    return DispatchResult {
                        success: true,
                        channel: index,
                        channel_name: channel.name().to_string(),
                        confirmed: receipt.confirmed,
                        message: receipt.message,
                        compose_links: receipt.compose_links,
                        failures,
                    };
                }
                Err(err) => {
                    tracing::warn!(
                        request_id = %request_id,
                        channel = channel.name(),
                        index,
                        error = %err,
                        "Notification channel failed, trying next"
                    );
                    failures.push(ChannelAttempt {
                        channel: index,
                        channel_name: channel.name().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        tracing::error!(request_id = %request_id, attempts = failures.len(), "Every notification channel failed");
        DispatchResult::exhausted(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::test_support::sample_notice;
    use crate::ports::ChannelReceipt;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    enum Behavior {
        Succeed,
        Fail,
        Hang,
    }

    struct TestChannel {
        name: &'static str,
        behavior: Behavior,
        calls: AtomicU32,
    }

    impl TestChannel {
        fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NotificationChannel for TestChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn deliver(&self, _notice: &BookingNotice) -> Result<ChannelReceipt, ChannelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => Ok(ChannelReceipt {
                    confirmed: true,
                    message: format!("sent via {}", self.name),
                    compose_links: Vec::new(),
                }),
                Behavior::Fail => Err(ChannelError::Status(500)),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Err(ChannelError::Transport("unreachable".to_string()))
                }
            }
        }
    }

    #[tokio::test]
    async fn first_success_wins() {
        let first = TestChannel::new("first", Behavior::Succeed);
        let second = TestChannel::new("second", Behavior::Succeed);
        let dispatcher = NotificationDispatcher::new(Duration::from_secs(1))
            .with_channel(first.clone())
            .with_channel(second.clone());

        let result = dispatcher.notify(&sample_notice()).await;

        assert!(result.success);
        assert_eq!(result.channel, 0);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn falls_back_to_second_channel_and_skips_third() {
        let first = TestChannel::new("first", Behavior::Fail);
        let second = TestChannel::new("second", Behavior::Succeed);
        let third = TestChannel::new("third", Behavior::Succeed);
        let dispatcher = NotificationDispatcher::new(Duration::from_secs(1))
            .with_channel(first.clone())
            .with_channel(second.clone())
            .with_channel(third.clone());

        let result = dispatcher.notify(&sample_notice()).await;

        assert!(result.success);
        assert_eq!(result.channel, 1);
        assert_eq!(result.channel_name, "second");
        assert_eq!(result.failures.len(), 1);
        assert_eq!(first.calls(), 1);
        assert_eq!(third.calls(), 0);
    }

    #[tokio::test]
    async fn hanging_channel_times_out() {
        let slow = TestChannel::new("slow", Behavior::Hang);
        let backup = TestChannel::new("backup", Behavior::Succeed);
        let dispatcher = NotificationDispatcher::new(Duration::from_millis(20))
            .with_channel(slow)
            .with_channel(backup);

        let result = dispatcher.notify(&sample_notice()).await;

        assert_eq!(result.channel, 1);
        assert!(result.failures[0].error.contains("timed out"));
    }

    #[tokio::test]
    async fn all_failures_are_reported_not_raised() {
        let dispatcher = NotificationDispatcher::new(Duration::from_secs(1))
            .with_channel(TestChannel::new("a", Behavior::Fail))
            .with_channel(TestChannel::new("b", Behavior::Fail));

        let result = dispatcher.notify(&sample_notice()).await;

        assert!(!result.success);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.channel_name, "b");
    }

    #[test]
    fn channel_names_follow_chain_order() {
        let dispatcher = NotificationDispatcher::new(Duration::from_secs(1))
            .with_channel(TestChannel::new("a", Behavior::Fail))
            .with_channel(TestChannel::new("b", Behavior::Fail));
        assert_eq!(dispatcher.channel_names(), vec!["a", "b"]);
    }
}
