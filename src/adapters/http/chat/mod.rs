//! HTTP adapter for chat endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    ConversationCreatedResponse, CreateConversationRequest, DirectConversationRequest,
    JoinRequest, JoinResponse, SendMessageRequest,
};
pub use routes::{chat_routes, conversation_routes};
