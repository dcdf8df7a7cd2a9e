//! WebSocket message types for live conversations.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: Connection status, chat events, errors, pongs
//! - Client → Server: Join, send, ping

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::conversation::ChatMessage;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Socket subscribed to the conversation.
    Connected(ConnectedMessage),

    /// A chat or join event accepted by the conversation.
    Message(MessageFrame),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent once the socket is subscribed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub conversation_id: String,
    pub client_id: String,
    pub timestamp: String,
}

/// Wraps a broadcast event.
#[derive(Debug, Clone, Serialize)]
pub struct MessageFrame {
    pub message: ChatMessage,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join the socket's conversation as `sender`.
    Join {
        #[serde(default)]
        sender: String,
    },

    /// Post a message to the socket's conversation.
    Send {
        #[serde(default)]
        sender: String,
        #[serde(default)]
        content: Value,
    },

    /// Heartbeat request.
    Ping,
}
