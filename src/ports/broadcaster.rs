//! Broadcaster port - Fan-out of accepted events to channel subscribers.
//!
//! A channel corresponds one-to-one with a conversation id. The broadcaster
//! owns nothing but the subscription index; conversation state lives in the
//! registry, and delivery is a best-effort notification layer on top of it.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::ChatMessage;
use crate::domain::foundation::{ConversationId, SubscriptionToken};

/// Failure delivering one event to one subscriber.
///
/// Always contained by the broadcaster: logged, counted, never returned
/// from `publish`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("Subscriber disconnected")]
    Disconnected,

    #[error("Subscriber buffer is full")]
    Backpressure,

    #[error("Delivery timed out after {0} ms")]
    TimedOut(u64),

    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// A transport-layer endpoint that receives broadcast events.
///
/// Implementations should return quickly; slow endpoints are cut off by
/// the broadcaster's delivery timeout.
#[async_trait]
pub trait DeliveryHandle: Send + Sync {
    /// Hands one event to the endpoint.
    async fn deliver(&self, event: &ChatMessage) -> Result<(), DeliveryError>;

    /// Label used in logs.
    fn name(&self) -> &str;
}

/// Outcome of a single `publish` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishReport {
    /// Subscribers that accepted the event.
    pub delivered: usize,
    /// Subscribers whose delivery failed or timed out.
    pub failed: usize,
}

impl PublishReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Port for channel subscription and fan-out.
///
/// `publish` must be called only after the registry has accepted the
/// underlying change. It delivers at most once to each subscriber registered
/// when the call snapshots the channel, and never fails.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Registers `subscriber` on the channel of `conversation_id`.
    async fn subscribe(
        &self,
        conversation_id: &ConversationId,
        subscriber: Arc<dyn DeliveryHandle>,
    ) -> SubscriptionToken;

    /// Removes a subscription. Unknown or already removed tokens are ignored.
    async fn unsubscribe(&self, token: &SubscriptionToken);

    /// Delivers `event` to every current subscriber of the channel.
    async fn publish(&self, conversation_id: &ConversationId, event: &ChatMessage)
        -> PublishReport;

    /// Number of subscribers currently on the channel.
    async fn subscriber_count(&self, conversation_id: &ConversationId) -> usize;
}
