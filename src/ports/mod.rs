//! Ports - Interfaces between the core and the outside world.
//!
//! Following hexagonal architecture, ports define the contracts the
//! application layer depends on. Adapters implement these ports.
//!
//! - `ConversationRegistry` - Conversation identity, membership and history
//! - `Broadcaster` / `DeliveryHandle` - Channel subscription and fan-out
//! - `ObjectStore` - Blob storage for uploaded files

mod broadcaster;
mod conversation_registry;
mod object_store;

pub use broadcaster::{Broadcaster, DeliveryError, DeliveryHandle, PublishReport};
pub use conversation_registry::{ConversationHandle, ConversationRegistry, SharedConversation};
pub use object_store::{ObjectStore, StorageError};
