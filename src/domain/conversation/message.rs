//! Chat message entity.
//!
//! Messages are immutable once accepted by the registry. The registry
//! stamps the acceptance time; callers never supply it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, ParticipantId, Timestamp};

/// Tag distinguishing chat content from synthetic notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    /// Regular chat content.
    #[default]
    Chat,
    /// Synthetic announcement that a participant joined.
    Join,
}

/// A message addressed to one conversation.
///
/// `content` is opaque to the core: text or any structured JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    conversation_id: ConversationId,
    sender: ParticipantId,
    content: serde_json::Value,
    #[serde(rename = "type", default)]
    kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
}

impl ChatMessage {
    /// Creates a chat message that has not been accepted yet.
    pub fn chat(
        conversation_id: ConversationId,
        sender: ParticipantId,
        content: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            conversation_id,
            sender,
            content: content.into(),
            kind: MessageKind::Chat,
            timestamp: None,
        }
    }

    /// Creates the synthetic JOIN announcement for a participant.
    pub fn join(conversation_id: ConversationId, participant: ParticipantId) -> Self {
        let content = serde_json::Value::String(format!("{} joined", participant));
        Self {
            conversation_id,
            sender: participant,
            content,
            kind: MessageKind::Join,
            timestamp: None,
        }
    }

    /// Returns a copy stamped with the acceptance time and retargeted to
    /// the conversation it is being appended to.
    pub(crate) fn accepted(mut self, conversation_id: &ConversationId, at: Timestamp) -> Self {
        self.conversation_id = conversation_id.clone();
        self.timestamp = Some(at);
        self
    }

    // === Accessors ===

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn sender(&self) -> &ParticipantId {
        &self.sender
    }

    pub fn content(&self) -> &serde_json::Value {
        &self.content
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Acceptance time; `None` until the registry has appended the message.
    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }
}
