//! Chat delivery configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Broadcast delivery tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Upper bound on one delivery to one subscriber
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_ms: u64,

    /// Queue depth per WebSocket subscriber before events are dropped
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

impl ChatConfig {
    /// Get delivery timeout as Duration
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.delivery_timeout_ms == 0 || self.delivery_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidDeliveryTimeout);
        }
        if self.subscriber_buffer == 0 {
            return Err(ValidationError::InvalidSubscriberBuffer);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            delivery_timeout_ms: default_delivery_timeout(),
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

fn default_delivery_timeout() -> u64 {
    500
}

fn default_subscriber_buffer() -> usize {
    64
}
