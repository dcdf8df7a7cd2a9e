//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `registry` - In-memory conversation registry
//! - `broadcast` - In-process fan-out to channel subscribers
//! - `storage` - Object stores for uploaded files
//! - `http` - REST endpoints
//! - `websocket` - Live conversation sockets

pub mod broadcast;
pub mod http;
pub mod registry;
pub mod storage;
pub mod websocket;

pub use broadcast::{ChannelDeliveryHandle, InMemoryBroadcaster};
pub use http::{app_router, AppState};
pub use registry::InMemoryConversationRegistry;
pub use storage::{InMemoryObjectStore, LocalObjectStore};
