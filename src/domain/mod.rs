//! Domain layer containing the chat relay's types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `conversation` - Conversation aggregate, chat messages, participant pairs
//! - `files` - Stored object metadata and upload limits

pub mod conversation;
pub mod files;
pub mod foundation;
