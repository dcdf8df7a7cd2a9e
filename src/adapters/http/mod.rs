//! HTTP adapters - REST API implementations.
//!
//! - `chat` - Conversation history, membership and messaging
//! - `files` - Upload, download and management of stored files
//! - `error` - Response envelopes and error mapping

pub mod chat;
pub mod error;
pub mod files;
mod router;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApiError, ApiResponse, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
