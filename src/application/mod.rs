//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Chat writes always go to the registry before anything is broadcast.

pub mod handlers;

pub use handlers::{
    ChatService, FileService, FileServiceError, JoinConversationCommand, JoinConversationResult,
    SendMessageCommand, SendMessageResult, UploadFileCommand, UploadedFile,
};
