//! Chat command and query handling.

mod chat_service;
mod commands;

pub use chat_service::ChatService;
pub use commands::{
    JoinConversationCommand, JoinConversationResult, SendMessageCommand, SendMessageResult,
};
