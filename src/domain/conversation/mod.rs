//! Conversation domain - participants, messages and direct-pair keys.

mod aggregate;
mod message;
mod pair;
mod state;

pub use aggregate::Conversation;
pub use message::{ChatMessage, MessageKind};
pub use pair::ParticipantPair;
pub use state::ConversationState;
