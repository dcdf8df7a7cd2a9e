//! ChatService - Orchestrates the registry and the broadcaster.
//!
//! Every mutating operation updates the registry first and publishes the
//! accepted event afterwards, so subscribers never observe an event that is
//! missing from history.

use std::collections::HashSet;
use std::sync::Arc;

use super::commands::{
    JoinConversationCommand, JoinConversationResult, SendMessageCommand, SendMessageResult,
};
use crate::domain::conversation::ChatMessage;
use crate::domain::foundation::{ConversationId, ParticipantId};
use crate::ports::{Broadcaster, ConversationRegistry, PublishReport};

/// Application service for conversation operations.
#[derive(Clone)]
pub struct ChatService {
    registry: Arc<dyn ConversationRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl ChatService {
    pub fn new(registry: Arc<dyn ConversationRegistry>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    pub fn registry(&self) -> &Arc<dyn ConversationRegistry> {
        &self.registry
    }

    pub fn broadcaster(&self) -> &Arc<dyn Broadcaster> {
        &self.broadcaster
    }

    /// Adds the participant and announces the join.
    ///
    /// A repeat join changes nothing and publishes nothing.
    pub async fn on_join(&self, cmd: JoinConversationCommand) -> JoinConversationResult {
        let JoinConversationCommand {
            conversation_id,
            participant,
        } = cmd;

        let added = self
            .registry
            .add_participant(&conversation_id, participant.clone())
            .await;
        if !added {
            tracing::debug!(
                conversation_id = %conversation_id,
                participant = %participant,
                "Participant already joined"
            );
            return JoinConversationResult {
                announcement: None,
                report: PublishReport::default(),
            };
        }

        let join = ChatMessage::join(conversation_id.clone(), participant);
        let accepted = self.registry.append(&conversation_id, join).await;
        let report = self.broadcaster.publish(&conversation_id, &accepted).await;

        tracing::info!(
            conversation_id = %conversation_id,
            participant = %accepted.sender(),
            delivered = report.delivered,
            "Participant joined"
        );

        JoinConversationResult {
            announcement: Some(accepted),
            report,
        }
    }

    /// Appends the message to history, then broadcasts the stored copy.
    pub async fn on_send(&self, cmd: SendMessageCommand) -> SendMessageResult {
        let message = ChatMessage::chat(cmd.conversation_id.clone(), cmd.sender, cmd.content);
        let accepted = self.registry.append(&cmd.conversation_id, message).await;
        let report = self.broadcaster.publish(&cmd.conversation_id, &accepted).await;

        tracing::debug!(
            conversation_id = %cmd.conversation_id,
            sender = %accepted.sender(),
            delivered = report.delivered,
            failed = report.failed,
            "Message sent"
        );

        SendMessageResult {
            message: accepted,
            report,
        }
    }

    /// Full history in acceptance order. Unknown ids yield an empty list.
    pub async fn query_history(&self, conversation_id: &ConversationId) -> Vec<ChatMessage> {
        self.registry.list_messages(conversation_id).await
    }

    pub async fn query_participants(
        &self,
        conversation_id: &ConversationId,
    ) -> HashSet<ParticipantId> {
        self.registry.list_participants(conversation_id).await
    }

    /// The canonical two-party conversation for the pair, in either order.
    pub async fn resolve_direct_conversation(
        &self,
        user_a: &ParticipantId,
        user_b: &ParticipantId,
    ) -> ConversationId {
        self.registry
            .resolve_two_party_conversation(user_a, user_b)
            .await
    }

    /// Returns the conversation with `id`, creating it if needed. `None`
    /// starts a new conversation under a generated id.
    pub async fn get_or_create_conversation(&self, id: Option<ConversationId>) -> ConversationId {
        self.registry.get_or_create(id).await.id().clone()
    }
}
