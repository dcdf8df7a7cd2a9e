//! Application handlers.
//!
//! Services that orchestrate domain operations across ports.

pub mod chat;
pub mod files;

pub use chat::{
    ChatService, JoinConversationCommand, JoinConversationResult, SendMessageCommand,
    SendMessageResult,
};
pub use files::{FileService, FileServiceError, UploadFileCommand, UploadedFile};
