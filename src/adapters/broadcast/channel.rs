//! Delivery handle that forwards events into a bounded queue.
//!
//! The WebSocket transport owns the receiving end and drains it into the
//! socket, so `deliver` never waits on the network.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::conversation::ChatMessage;
use crate::ports::{DeliveryError, DeliveryHandle};

/// `DeliveryHandle` writing into an `mpsc` channel without waiting.
///
/// A full queue is reported as `Backpressure`; a dropped receiver as
/// `Disconnected`.
pub struct ChannelDeliveryHandle {
    name: String,
    sender: mpsc::Sender<ChatMessage>,
}

impl ChannelDeliveryHandle {
    /// Creates the handle and the receiver the transport should drain.
    pub fn new(name: impl Into<String>, capacity: usize) -> (Self, mpsc::Receiver<ChatMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                name: name.into(),
                sender,
            },
            receiver,
        )
    }
}

#[async_trait]
impl DeliveryHandle for ChannelDeliveryHandle {
    async fn deliver(&self, event: &ChatMessage) -> Result<(), DeliveryError> {
        match self.sender.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(DeliveryError::Backpressure),
            Err(TrySendError::Closed(_)) => Err(DeliveryError::Disconnected),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
