//! In-memory conversation registry.
//!
//! # Locking
//!
//! ```text
//! direct_pairs (Mutex)          held across scan + create of a direct conversation
//!   └── conversations (RwLock)  insert-if-absent under the write lock
//!         └── SharedConversation (Mutex, one per conversation)
//! ```
//!
//! Locks are only ever acquired top-down in this order, and the map lock is
//! released before a per-conversation lock is taken, so unrelated
//! conversations never contend with each other.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::conversation::{ChatMessage, Conversation, ParticipantPair};
use crate::domain::foundation::{ConversationId, ParticipantId, Timestamp};
use crate::ports::{ConversationHandle, ConversationRegistry, SharedConversation};

/// Process-wide conversation registry held in memory.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
pub struct InMemoryConversationRegistry {
    conversations: RwLock<HashMap<ConversationId, ConversationHandle>>,
    /// Last known direct conversation per unordered pair.
    ///
    /// Entries are hints: they are re-validated against the conversation's
    /// current participant set before being trusted.
    direct_pairs: Mutex<HashMap<ParticipantPair, ConversationId>>,
}

impl InMemoryConversationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            direct_pairs: Mutex::new(HashMap::new()),
        }
    }

    async fn lookup(&self, id: &ConversationId) -> Option<ConversationHandle> {
        self.conversations.read().await.get(id).cloned()
    }

    /// Registers a conversation under a freshly generated id.
    async fn insert_generated(
        &self,
        mut conversation_for: impl FnMut(ConversationId) -> Conversation + Send,
    ) -> ConversationHandle {
        let mut conversations = self.conversations.write().await;
        loop {
            let id = ConversationId::generate();
            if let Entry::Vacant(slot) = conversations.entry(id.clone()) {
                let handle =
                    Arc::new(SharedConversation::from_conversation(conversation_for(id)));
                slot.insert(handle.clone());
                tracing::debug!(conversation_id = %handle.id(), "Conversation created");
                return handle;
            }
        }
    }

    /// Existing conversation whose participants are exactly the pair.
    ///
    /// The indexed conversation wins while it still holds exactly the pair,
    /// so a resolved pair keeps its id even if an older conversation later
    /// comes to match. Otherwise scans, and among several matches the oldest
    /// conversation wins.
    async fn find_direct(
        &self,
        index: &HashMap<ParticipantPair, ConversationId>,
        pair: &ParticipantPair,
    ) -> Option<ConversationId> {
        let (a, b) = (pair.first(), pair.second());

        if let Some(id) = index.get(pair) {
            if let Some(handle) = self.lookup(id).await {
                if handle.lock().await.is_exact_pair(a, b) {
                    return Some(id.clone());
                }
            }
        }

        let candidates: Vec<ConversationHandle> =
            self.conversations.read().await.values().cloned().collect();

        let mut best: Option<(Timestamp, ConversationId)> = None;
        for handle in candidates {
            let conversation = handle.lock().await;
            if !conversation.is_exact_pair(a, b) {
                continue;
            }
            let key = (*conversation.created_at(), conversation.id().clone());
            if best.as_ref().map_or(true, |current| key < *current) {
                best = Some(key);
            }
        }
        best.map(|(_, id)| id)
    }
}

impl Default for InMemoryConversationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRegistry for InMemoryConversationRegistry {
    async fn get_or_create(&self, id: Option<ConversationId>) -> ConversationHandle {
        let Some(id) = id else {
            return self.insert_generated(Conversation::new).await;
        };

        if let Some(handle) = self.lookup(&id).await {
            return handle;
        }

        let mut conversations = self.conversations.write().await;
        conversations
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(conversation_id = %id, "Conversation created");
                Arc::new(SharedConversation::new(id))
            })
            .clone()
    }

    async fn append(&self, conversation_id: &ConversationId, message: ChatMessage) -> ChatMessage {
        let handle = self.get_or_create(Some(conversation_id.clone())).await;
        let mut conversation = handle.lock().await;
        // Stamped under the conversation lock so timestamps follow append order.
        let accepted = conversation.accept(message, Timestamp::now());
        tracing::trace!(
            conversation_id = %conversation_id,
            sender = %accepted.sender(),
            history_len = conversation.messages().len(),
            "Message appended"
        );
        accepted
    }

    async fn list_messages(&self, conversation_id: &ConversationId) -> Vec<ChatMessage> {
        let handle = self.get_or_create(Some(conversation_id.clone())).await;
        let conversation = handle.lock().await;
        conversation.messages().to_vec()
    }

    async fn add_participant(
        &self,
        conversation_id: &ConversationId,
        participant: ParticipantId,
    ) -> bool {
        let handle = self.get_or_create(Some(conversation_id.clone())).await;
        let added = handle.lock().await.add_participant(participant);
        added
    }

    async fn list_participants(&self, conversation_id: &ConversationId) -> HashSet<ParticipantId> {
        let handle = self.get_or_create(Some(conversation_id.clone())).await;
        let participants = handle.lock().await.participants().clone();
        participants
    }

    async fn resolve_two_party_conversation(
        &self,
        a: &ParticipantId,
        b: &ParticipantId,
    ) -> ConversationId {
        let pair = ParticipantPair::new(a.clone(), b.clone());

        // Held for the whole lookup-or-create so two callers resolving the
        // same pair cannot both miss and both create.
        let mut index = self.direct_pairs.lock().await;

        if let Some(id) = self.find_direct(&index, &pair).await {
            index.insert(pair, id.clone());
            return id;
        }

        let handle = self
            .insert_generated(|id| {
                let mut conversation = Conversation::new(id);
                conversation.add_participant(a.clone());
                conversation.add_participant(b.clone());
                conversation
            })
            .await;

        let id = handle.id().clone();
        tracing::info!(
            conversation_id = %id,
            first = %pair.first(),
            second = %pair.second(),
            "Direct conversation created"
        );
        index.insert(pair, id.clone());
        id
    }

    async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{ConversationState, MessageKind};

    fn registry() -> Arc<InMemoryConversationRegistry> {
        Arc::new(InMemoryConversationRegistry::new())
    }

    fn chat(conv: &str, sender: &str, text: &str) -> ChatMessage {
        ChatMessage::chat(conv.into(), sender.into(), text)
    }

    #[tokio::test]
    async fn get_or_create_without_id_always_creates() {
        let reg = registry();
        let a = reg.get_or_create(None).await;
        let b = reg.get_or_create(None).await;

        assert_ne!(a.id(), b.id());
        assert_eq!(reg.conversation_count().await, 2);
    }

    #[tokio::test]
    async fn get_or_create_with_id_returns_same_instance() {
        let reg = registry();
        let a = reg.get_or_create(Some("c1".into())).await;
        let b = reg.get_or_create(Some("c1".into())).await;

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(reg.conversation_count().await, 1);
        assert_eq!(a.snapshot().await.state(), ConversationState::Empty);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_creates_exactly_once() {
        let reg = registry();
        let mut tasks = Vec::new();
        for _ in 0..64 {
            let reg = reg.clone();
            tasks.push(tokio::spawn(async move {
                reg.get_or_create(Some("shared".into())).await
            }));
        }

        let handles: Vec<ConversationHandle> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(reg.conversation_count().await, 1);
        assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
    }

    #[tokio::test]
    async fn append_assigns_timestamp_and_preserves_order() {
        let reg = registry();
        let id = ConversationId::new("c1");

        let first = reg.append(&id, chat("c1", "alice", "one")).await;
        let second = reg.append(&id, chat("c1", "bob", "two")).await;

        let history = reg.list_messages(&id).await;
        assert_eq!(history, vec![first.clone(), second.clone()]);
        assert!(first.timestamp().unwrap() <= second.timestamp().unwrap());
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_kept_exactly_once() {
        let reg = registry();
        let id = ConversationId::new("busy");
        let mut tasks = Vec::new();
        for i in 0..100 {
            let reg = reg.clone();
            let id = id.clone();
            tasks.push(tokio::spawn(async move {
                reg.append(&id, chat("busy", "writer", &format!("m{i}"))).await
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let history = reg.list_messages(&id).await;
        assert_eq!(history.len(), 100);

        let distinct: HashSet<String> = history
            .iter()
            .map(|m| m.content().as_str().unwrap().to_string())
            .collect();
        assert_eq!(distinct.len(), 100);

        // Timestamps are assigned under the conversation lock.
        assert!(history
            .windows(2)
            .all(|w| w[0].timestamp().unwrap() <= w[1].timestamp().unwrap()));
    }

    #[tokio::test]
    async fn unknown_conversation_reads_are_empty() {
        let reg = registry();
        let id = ConversationId::new("never-seen-id");

        assert!(reg.list_messages(&id).await.is_empty());
        assert!(reg.list_participants(&id).await.is_empty());
        assert_eq!(reg.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn add_participant_is_idempotent() {
        let reg = registry();
        let id = ConversationId::new("c1");

        assert!(reg.add_participant(&id, "alice".into()).await);
        assert!(!reg.add_participant(&id, "alice".into()).await);

        let participants = reg.list_participants(&id).await;
        assert_eq!(participants.len(), 1);
        assert!(participants.contains(&ParticipantId::new("alice")));
    }

    #[tokio::test]
    async fn resolve_pair_is_order_independent() {
        let reg = registry();
        let alice = ParticipantId::new("alice");
        let bob = ParticipantId::new("bob");

        let first = reg.resolve_two_party_conversation(&alice, &bob).await;
        let second = reg.resolve_two_party_conversation(&bob, &alice).await;

        assert_eq!(first, second);
        let participants = reg.list_participants(&first).await;
        assert_eq!(participants.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_resolve_creates_one_conversation() {
        let reg = registry();
        let mut tasks = Vec::new();
        for i in 0..32 {
            let reg = reg.clone();
            tasks.push(tokio::spawn(async move {
                let (a, b) = if i % 2 == 0 { ("alice", "bob") } else { ("bob", "alice") };
                reg.resolve_two_party_conversation(&a.into(), &b.into()).await
            }));
        }

        let ids: HashSet<ConversationId> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(ids.len(), 1);
        assert_eq!(reg.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn resolve_finds_named_conversation_with_exact_pair() {
        let reg = registry();
        let id = ConversationId::new("team-room");
        reg.add_participant(&id, "alice".into()).await;
        reg.add_participant(&id, "bob".into()).await;

        let resolved = reg
            .resolve_two_party_conversation(&"bob".into(), &"alice".into())
            .await;

        assert_eq!(resolved, id);
        assert_eq!(reg.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn resolve_ignores_conversation_that_grew_past_the_pair() {
        let reg = registry();
        let alice = ParticipantId::new("alice");
        let bob = ParticipantId::new("bob");

        let direct = reg.resolve_two_party_conversation(&alice, &bob).await;
        reg.add_participant(&direct, "carol".into()).await;

        let again = reg.resolve_two_party_conversation(&alice, &bob).await;
        assert_ne!(direct, again);
        assert_eq!(reg.conversation_count().await, 2);
    }

    #[tokio::test]
    async fn resolved_pair_keeps_its_conversation_over_an_older_match() {
        let reg = registry();
        let alice = ParticipantId::new("alice");
        let bob = ParticipantId::new("bob");
        let older = ConversationId::new("older");
        reg.get_or_create(Some(older.clone())).await;

        let direct = reg.resolve_two_party_conversation(&alice, &bob).await;
        reg.add_participant(&older, alice.clone()).await;
        reg.add_participant(&older, bob.clone()).await;

        let again = reg.resolve_two_party_conversation(&bob, &alice).await;
        assert_eq!(again, direct);
        assert_ne!(again, older);
    }

    #[tokio::test]
    async fn unindexed_pair_resolves_to_the_oldest_match() {
        let reg = registry();
        let alice = ParticipantId::new("alice");
        let bob = ParticipantId::new("bob");
        for id in ["first", "second"] {
            let id = ConversationId::new(id);
            reg.add_participant(&id, alice.clone()).await;
            reg.add_participant(&id, bob.clone()).await;
        }

        let resolved = reg.resolve_two_party_conversation(&alice, &bob).await;
        assert_eq!(resolved.as_str(), "first");
    }

    #[tokio::test]
    async fn resolve_with_same_participant_twice_is_stable() {
        let reg = registry();
        let alice = ParticipantId::new("alice");

        let first = reg.resolve_two_party_conversation(&alice, &alice).await;
        let second = reg.resolve_two_party_conversation(&alice, &alice).await;

        assert_eq!(first, second);
        assert_eq!(reg.list_participants(&first).await.len(), 1);
    }

    #[tokio::test]
    async fn history_keeps_join_and_chat_kinds() {
        let reg = registry();
        let id = ConversationId::new("c1");
        reg.append(&id, ChatMessage::join(id.clone(), "alice".into())).await;
        reg.append(&id, chat("c1", "alice", "hi")).await;

        let kinds: Vec<MessageKind> = reg
            .list_messages(&id)
            .await
            .iter()
            .map(|m| m.kind())
            .collect();
        assert_eq!(kinds, vec![MessageKind::Join, MessageKind::Chat]);
    }
}
