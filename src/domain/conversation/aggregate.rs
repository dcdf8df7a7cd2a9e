//! Conversation aggregate - participants and ordered message history.

use std::collections::HashSet;

use crate::domain::conversation::{ChatMessage, ConversationState};
use crate::domain::foundation::{ConversationId, ParticipantId, Timestamp};

/// A named channel holding a participant set and an append-only history.
///
/// # Invariants
///
/// - `participants` has set semantics; repeated joins are no-ops
/// - `messages` only grows, in acceptance order
/// - every stored message carries the acceptance timestamp
#[derive(Debug, Clone)]
pub struct Conversation {
    id: ConversationId,
    participants: HashSet<ParticipantId>,
    messages: Vec<ChatMessage>,
    created_at: Timestamp,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new(id: ConversationId) -> Self {
        Self {
            id,
            participants: HashSet::new(),
            messages: Vec::new(),
            created_at: Timestamp::now(),
        }
    }

    // === Accessors ===

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn participants(&self) -> &HashSet<ParticipantId> {
        &self.participants
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Derived lifecycle state.
    pub fn state(&self) -> ConversationState {
        if self.participants.is_empty() && self.messages.is_empty() {
            ConversationState::Empty
        } else {
            ConversationState::Active
        }
    }

    // === Mutations ===

    /// Adds a participant. Returns `true` if they were not already present.
    pub fn add_participant(&mut self, participant: ParticipantId) -> bool {
        self.participants.insert(participant)
    }

    /// Stamps `message` with `at`, appends it and returns the stored copy.
    pub fn accept(&mut self, message: ChatMessage, at: Timestamp) -> ChatMessage {
        let accepted = message.accepted(&self.id, at);
        self.messages.push(accepted.clone());
        accepted
    }

    /// True if the participant set is exactly `{a, b}` (as a set, so
    /// `a == b` means a single participant).
    pub fn is_exact_pair(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        let expected = if a == b { 1 } else { 2 };
        self.participants.len() == expected
            && self.participants.contains(a)
            && self.participants.contains(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> Conversation {
        Conversation::new(ConversationId::new("c1"))
    }

    #[test]
    fn new_conversation_is_empty() {
        let c = conv();
        assert_eq!(c.state(), ConversationState::Empty);
        assert!(c.participants().is_empty());
        assert!(c.messages().is_empty());
    }

    #[test]
    fn adding_participant_activates() {
        let mut c = conv();
        assert!(c.add_participant("alice".into()));
        assert_eq!(c.state(), ConversationState::Active);
    }

    #[test]
    fn repeated_participant_is_noop() {
        let mut c = conv();
        assert!(c.add_participant("alice".into()));
        assert!(!c.add_participant("alice".into()));
        assert_eq!(c.participants().len(), 1);
    }

    #[test]
    fn accept_appends_in_order_with_timestamp() {
        let mut c = conv();
        let first = c.accept(
            ChatMessage::chat("c1".into(), "alice".into(), "one"),
            Timestamp::now(),
        );
        c.accept(
            ChatMessage::chat("c1".into(), "bob".into(), "two"),
            Timestamp::now(),
        );

        assert_eq!(c.messages().len(), 2);
        assert_eq!(c.messages()[0], first);
        assert_eq!(c.messages()[1].sender().as_str(), "bob");
        assert!(c.messages().iter().all(|m| m.timestamp().is_some()));
        assert_eq!(c.state(), ConversationState::Active);
    }

    #[test]
    fn exact_pair_requires_both_and_only_both() {
        let mut c = conv();
        let alice = ParticipantId::new("alice");
        let bob = ParticipantId::new("bob");
        c.add_participant(alice.clone());
        assert!(!c.is_exact_pair(&alice, &bob));

        c.add_participant(bob.clone());
        assert!(c.is_exact_pair(&alice, &bob));
        assert!(c.is_exact_pair(&bob, &alice));

        c.add_participant("carol".into());
        assert!(!c.is_exact_pair(&alice, &bob));
    }

    #[test]
    fn self_pair_matches_single_participant() {
        let mut c = conv();
        let alice = ParticipantId::new("alice");
        c.add_participant(alice.clone());
        assert!(c.is_exact_pair(&alice, &alice));
    }
}
