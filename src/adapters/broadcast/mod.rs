//! Broadcast adapters.
//!
//! - `InMemoryBroadcaster` - In-process subscription index and fan-out
//! - `ChannelDeliveryHandle` - Delivery target backed by a bounded mpsc queue

mod channel;
mod in_memory;

pub use channel::ChannelDeliveryHandle;
pub use in_memory::{InMemoryBroadcaster, DEFAULT_DELIVERY_TIMEOUT};
