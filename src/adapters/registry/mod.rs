//! Conversation registry adapters.
//!
//! - `InMemoryConversationRegistry` - Process-memory registry; state is lost on restart

mod in_memory;

pub use in_memory::InMemoryConversationRegistry;
