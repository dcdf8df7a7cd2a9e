//! HTTP handlers for chat endpoints.
//!
//! These handlers validate request input and delegate to `ChatService`.
//! Unknown conversation ids are never an error: reads return empty results.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::{ApiError, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::{JoinConversationCommand, SendMessageCommand};
use crate::domain::foundation::{ConversationId, ParticipantId};

use super::dto::{
    ConversationCreatedResponse, CreateConversationRequest, DirectConversationRequest,
    JoinRequest, JoinResponse, SendMessageRequest,
};

/// GET /api/chat/:conversation_id - Full message history.
pub async fn get_history(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = ConversationId::parse(conversation_id)?;
    let messages = state.chat.query_history(&conversation_id).await;
    Ok(ApiResponse::ok(messages))
}

/// GET /api/chat/:conversation_id/participants - Participants, sorted.
pub async fn get_participants(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = ConversationId::parse(conversation_id)?;
    let mut participants: Vec<String> = state
        .chat
        .query_participants(&conversation_id)
        .await
        .into_iter()
        .map(|p| p.as_str().to_string())
        .collect();
    participants.sort();
    Ok(ApiResponse::ok(participants))
}

/// POST /api/chat/:conversation_id/join - Join and announce.
///
/// # Errors
/// - 400 Bad Request: empty sender
pub async fn join_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = ConversationId::parse(conversation_id)?;
    let participant = ParticipantId::parse(req.sender)?;

    let result = state
        .chat
        .on_join(JoinConversationCommand::new(
            conversation_id.clone(),
            participant.clone(),
        ))
        .await;

    Ok(ApiResponse::ok(JoinResponse {
        conversation_id: conversation_id.to_string(),
        participant: participant.to_string(),
        joined: result.newly_joined(),
    }))
}

/// POST /api/chat/:conversation_id/messages - Append and broadcast.
///
/// Returns the stored message including its timestamp.
///
/// # Errors
/// - 400 Bad Request: empty sender
pub async fn send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = ConversationId::parse(conversation_id)?;
    let sender = ParticipantId::parse(req.sender)?;

    let result = state
        .chat
        .on_send(SendMessageCommand::new(conversation_id, sender, req.content))
        .await;

    Ok(ApiResponse::ok(result.message))
}

/// POST /api/conversations - Get or create a conversation.
pub async fn create_conversation(
    State(state): State<AppState>,
    body: Option<Json<CreateConversationRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let requested = match req.id {
        Some(id) => Some(ConversationId::parse(id)?),
        None => None,
    };

    let conversation_id = state.chat.get_or_create_conversation(requested).await;
    Ok(ApiResponse::ok(ConversationCreatedResponse {
        conversation_id: conversation_id.to_string(),
    }))
}

/// POST /api/conversations/direct - Canonical conversation for a pair of users.
///
/// # Errors
/// - 400 Bad Request: either user is empty
pub async fn resolve_direct(
    State(state): State<AppState>,
    Json(req): Json<DirectConversationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_a = ParticipantId::parse(req.user_a)
        .map_err(|_| ApiError::bad_request("Field 'userA' cannot be empty"))?;
    let user_b = ParticipantId::parse(req.user_b)
        .map_err(|_| ApiError::bad_request("Field 'userB' cannot be empty"))?;

    let conversation_id = state.chat.resolve_direct_conversation(&user_a, &user_b).await;
    Ok(ApiResponse::ok(ConversationCreatedResponse {
        conversation_id: conversation_id.to_string(),
    }))
}
