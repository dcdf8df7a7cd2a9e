//! Conversation lifecycle state machine.
//!
//! A conversation starts `Empty` and becomes `Active` once it has a
//! participant or a message. There is no closed state: conversations
//! live for the lifetime of the process.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Just created, no participants and no messages.
    #[default]
    Empty,

    /// Has at least one participant or one message.
    Active,
}

impl ConversationState {
    /// Returns true once anything has happened in the conversation.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationState::*;
        matches!((self, target), (Empty, Active) | (Active, Active))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationState::*;
        match self {
            Empty => vec![Active],
            Active => vec![Active],
        }
    }
}
