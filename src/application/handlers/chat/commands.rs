//! Commands accepted by the chat service and their results.

use serde_json::Value;

use crate::domain::conversation::ChatMessage;
use crate::domain::foundation::{ConversationId, ParticipantId};
use crate::ports::PublishReport;

/// Command to join a participant to a conversation.
#[derive(Debug, Clone)]
pub struct JoinConversationCommand {
    pub conversation_id: ConversationId,
    pub participant: ParticipantId,
}

impl JoinConversationCommand {
    pub fn new(conversation_id: ConversationId, participant: ParticipantId) -> Self {
        Self {
            conversation_id,
            participant,
        }
    }
}

/// Result of a join.
#[derive(Debug, Clone)]
pub struct JoinConversationResult {
    /// The JOIN event appended and announced, `None` for a repeat join.
    pub announcement: Option<ChatMessage>,
    /// Fan-out outcome of the announcement.
    pub report: PublishReport,
}

impl JoinConversationResult {
    /// True when the participant was not a member before this join.
    pub fn newly_joined(&self) -> bool {
        self.announcement.is_some()
    }
}

/// Command to post a chat message to a conversation.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub conversation_id: ConversationId,
    pub sender: ParticipantId,
    pub content: Value,
}

impl SendMessageCommand {
    pub fn new(
        conversation_id: ConversationId,
        sender: ParticipantId,
        content: impl Into<Value>,
    ) -> Self {
        Self {
            conversation_id,
            sender,
            content: content.into(),
        }
    }
}

/// Result of sending a message.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// The message as stored, including its assigned timestamp.
    pub message: ChatMessage,
    /// Fan-out outcome.
    pub report: PublishReport,
}
