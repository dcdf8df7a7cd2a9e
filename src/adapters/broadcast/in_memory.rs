//! In-process broadcaster.
//!
//! # Architecture
//!
//! ```text
//! Channel: c1            Channel: c2
//! ├── token-a → handle   └── token-d → handle
//! ├── token-b → handle
//! └── token-c → handle
//! ```
//!
//! `publish` copies the channel's subscriber list under a short read lock,
//! releases it, and only then invokes the handles. Each delivery runs
//! concurrently under its own timeout, so one slow or failing subscriber
//! cannot hold up the others or the publisher.

use async_trait::async_trait;
use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::conversation::ChatMessage;
use crate::domain::foundation::{ConversationId, SubscriptionToken};
use crate::ports::{Broadcaster, DeliveryError, DeliveryHandle, PublishReport};

/// Default upper bound on a single delivery.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Default)]
struct SubscriptionIndex {
    /// conversation → (token → handle)
    channels: HashMap<ConversationId, HashMap<SubscriptionToken, Arc<dyn DeliveryHandle>>>,
    /// token → conversation, for O(1) unsubscribe.
    tokens: HashMap<SubscriptionToken, ConversationId>,
}

impl SubscriptionIndex {
    fn remove(&mut self, token: &SubscriptionToken) -> Option<ConversationId> {
        let conversation_id = self.tokens.remove(token)?;
        if let Some(channel) = self.channels.get_mut(&conversation_id) {
            channel.remove(token);
            if channel.is_empty() {
                self.channels.remove(&conversation_id);
            }
        }
        Some(conversation_id)
    }
}

/// Broadcaster keeping its subscription index in memory.
pub struct InMemoryBroadcaster {
    index: RwLock<SubscriptionIndex>,
    delivery_timeout: Duration,
    /// `delivery_timeout` as reported in `DeliveryError::TimedOut`, saturating.
    delivery_timeout_ms: u64,
}

impl InMemoryBroadcaster {
    /// Creates a broadcaster with the given per-delivery timeout.
    pub fn new(delivery_timeout: Duration) -> Self {
        Self {
            index: RwLock::new(SubscriptionIndex::default()),
            delivery_timeout,
            delivery_timeout_ms: u64::try_from(delivery_timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create with the default timeout (500 ms).
    pub fn with_default_timeout() -> Self {
        Self::new(DEFAULT_DELIVERY_TIMEOUT)
    }

    async fn deliver_one(
        &self,
        handle: &Arc<dyn DeliveryHandle>,
        event: &ChatMessage,
    ) -> Result<(), DeliveryError> {
        let delivery = AssertUnwindSafe(handle.deliver(event)).catch_unwind();
        match tokio::time::timeout(self.delivery_timeout, delivery).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(DeliveryError::Failed("subscriber panicked".to_string())),
            Err(_) => Err(DeliveryError::TimedOut(self.delivery_timeout_ms)),
        }
    }
}

#[cfg(test)]
impl InMemoryBroadcaster {
    async fn active_channels(&self) -> Vec<ConversationId> {
        self.index.read().await.channels.keys().cloned().collect()
    }

    async fn total_subscriber_count(&self) -> usize {
        self.index.read().await.tokens.len()
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::with_default_timeout()
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    async fn subscribe(
        &self,
        conversation_id: &ConversationId,
        subscriber: Arc<dyn DeliveryHandle>,
    ) -> SubscriptionToken {
        let token = SubscriptionToken::new();
        let mut index = self.index.write().await;
        tracing::debug!(
            conversation_id = %conversation_id,
            subscriber = subscriber.name(),
            token = %token,
            "Subscribed"
        );
        index
            .channels
            .entry(conversation_id.clone())
            .or_default()
            .insert(token, subscriber);
        index.tokens.insert(token, conversation_id.clone());
        token
    }

    async fn unsubscribe(&self, token: &SubscriptionToken) {
        if let Some(conversation_id) = self.index.write().await.remove(token) {
            tracing::debug!(conversation_id = %conversation_id, token = %token, "Unsubscribed");
        }
    }

    async fn publish(
        &self,
        conversation_id: &ConversationId,
        event: &ChatMessage,
    ) -> PublishReport {
        let subscribers: Vec<(SubscriptionToken, Arc<dyn DeliveryHandle>)> = {
            let index = self.index.read().await;
            match index.channels.get(conversation_id) {
                Some(channel) => channel
                    .iter()
                    .map(|(token, handle)| (*token, Arc::clone(handle)))
                    .collect(),
                None => Vec::new(),
            }
        };

        if subscribers.is_empty() {
            tracing::trace!(conversation_id = %conversation_id, "No subscribers");
            return PublishReport::default();
        }

        let outcomes = futures::future::join_all(
            subscribers
                .iter()
                .map(|(_, handle)| self.deliver_one(handle, event)),
        )
        .await;

        let mut report = PublishReport::default();
        let mut disconnected = Vec::new();
        for ((token, handle), outcome) in subscribers.iter().zip(outcomes) {
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        conversation_id = %conversation_id,
                        subscriber = handle.name(),
                        error = %err,
                        "Delivery failed"
                    );
                    if err == DeliveryError::Disconnected {
                        disconnected.push(*token);
                    }
                }
            }
        }

        if !disconnected.is_empty() {
            let mut index = self.index.write().await;
            for token in &disconnected {
                index.remove(token);
            }
        }

        report
    }

    async fn subscriber_count(&self, conversation_id: &ConversationId) -> usize {
        self.index
            .read()
            .await
            .channels
            .get(conversation_id)
            .map(|channel| channel.len())
            .unwrap_or(0)
    }
}
