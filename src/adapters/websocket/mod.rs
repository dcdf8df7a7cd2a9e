//! WebSocket adapter for live conversations.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  join / send   ┌─────────────┐   append   ┌──────────────────────┐
//! │ WebSocket    │ ─────────────▶ │ ChatService │ ─────────▶ │ ConversationRegistry │
//! │ client       │                └─────────────┘            └──────────────────────┘
//! │              │                       │ publish
//! │              │                       ▼
//! │              │  bounded queue ┌─────────────┐
//! │              │ ◀───────────── │ Broadcaster │
//! └──────────────┘                └─────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod messages;

pub use handler::{websocket_router, ws_handler};
pub use messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, MessageFrame, PongMessage, ServerMessage,
};
