//! ConversationRegistry port - Authoritative store of conversations.
//!
//! The registry owns conversation identity, membership and message history.
//! Every id is resolvable: reads of an unknown id lazily create an empty
//! conversation instead of failing with "not found".

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::conversation::{ChatMessage, Conversation};
use crate::domain::foundation::{ConversationId, ParticipantId};

/// A registered conversation.
///
/// There is exactly one instance per id for the lifetime of the registry.
/// Mutation goes through [`SharedConversation::lock`], which serializes
/// writers of this conversation without touching any other conversation.
#[derive(Debug)]
pub struct SharedConversation {
    id: ConversationId,
    inner: Mutex<Conversation>,
}

impl SharedConversation {
    /// Wraps a fresh, empty conversation.
    pub fn new(id: ConversationId) -> Self {
        Self {
            inner: Mutex::new(Conversation::new(id.clone())),
            id,
        }
    }

    /// Wraps an already populated conversation.
    pub fn from_conversation(conversation: Conversation) -> Self {
        Self {
            id: conversation.id().clone(),
            inner: Mutex::new(conversation),
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Acquires the per-conversation lock.
    pub async fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.inner.lock().await
    }

    /// Point-in-time copy of the conversation.
    pub async fn snapshot(&self) -> Conversation {
        self.inner.lock().await.clone()
    }
}

/// Shared handle to a registered conversation.
pub type ConversationHandle = Arc<SharedConversation>;

/// Port for the conversation registry.
///
/// Implementations must guarantee:
/// - `get_or_create` creates at most one conversation per id, even under
///   concurrent callers
/// - appends to one conversation are linearized; none is lost or duplicated
/// - `resolve_two_party_conversation` never creates two conversations for
///   the same unordered pair
/// - no operation blocks on I/O
#[async_trait]
pub trait ConversationRegistry: Send + Sync {
    /// Returns the conversation for `id`, creating it if absent.
    ///
    /// With `None`, always creates and registers a new conversation under a
    /// freshly generated id.
    async fn get_or_create(&self, id: Option<ConversationId>) -> ConversationHandle;

    /// Stamps `message` with the acceptance time and appends it.
    ///
    /// Returns the stored message, including its timestamp.
    async fn append(&self, conversation_id: &ConversationId, message: ChatMessage) -> ChatMessage;

    /// Full history in append order. Empty for a conversation that has
    /// never received a message.
    async fn list_messages(&self, conversation_id: &ConversationId) -> Vec<ChatMessage>;

    /// Idempotent set insertion. Returns `true` if the participant was new.
    async fn add_participant(
        &self,
        conversation_id: &ConversationId,
        participant: ParticipantId,
    ) -> bool;

    /// Current participant set.
    async fn list_participants(&self, conversation_id: &ConversationId) -> HashSet<ParticipantId>;

    /// Finds the conversation whose participant set is exactly `{a, b}`,
    /// or atomically creates one with both participants.
    async fn resolve_two_party_conversation(
        &self,
        a: &ParticipantId,
        b: &ParticipantId,
    ) -> ConversationId;

    /// Number of registered conversations.
    async fn conversation_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ConversationRegistry) {}

    #[tokio::test]
    async fn shared_conversation_exposes_id_and_snapshot() {
        let shared = SharedConversation::new(ConversationId::new("c1"));
        assert_eq!(shared.id().as_str(), "c1");

        shared.lock().await.add_participant("alice".into());
        let snapshot = shared.snapshot().await;
        assert_eq!(snapshot.participants().len(), 1);
    }

    #[tokio::test]
    async fn from_conversation_keeps_history() {
        let mut conv = Conversation::new(ConversationId::new("c2"));
        conv.accept(
            ChatMessage::chat("c2".into(), "bob".into(), "hey"),
            Timestamp::now(),
        );
        let shared = SharedConversation::from_conversation(conv);
        assert_eq!(shared.id().as_str(), "c2");
        assert_eq!(shared.snapshot().await.messages().len(), 1);
    }
}
