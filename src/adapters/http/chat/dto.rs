//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat/:conversation_id/join`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub sender: String,
}

/// Body of `POST /api/chat/:conversation_id/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender: String,
    /// Text or any JSON payload.
    #[serde(default)]
    pub content: Value,
}

/// Body of `POST /api/conversations`. An absent id starts a new conversation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of `POST /api/conversations/direct`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectConversationRequest {
    #[serde(default)]
    pub user_a: String,
    #[serde(default)]
    pub user_b: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationCreatedResponse {
    pub conversation_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub conversation_id: String,
    pub participant: String,
    /// False when the participant was already a member.
    pub joined: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_request_uses_camel_case() {
        let req: DirectConversationRequest =
            serde_json::from_str(r#"{"userA":"alice","userB":"bob"}"#).unwrap();
        assert_eq!(req.user_a, "alice");
        assert_eq!(req.user_b, "bob");
    }

    #[test]
    fn send_request_accepts_structured_content() {
        let req: SendMessageRequest =
            serde_json::from_str(r#"{"sender":"alice","content":{"url":"x.png"}}"#).unwrap();
        assert_eq!(req.content["url"], "x.png");
    }

    #[test]
    fn missing_sender_defaults_to_empty() {
        let req: JoinRequest = serde_json::from_str("{}").unwrap();
        assert!(req.sender.is_empty());
    }
}
