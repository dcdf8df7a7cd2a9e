//! WebSocket upgrade handler for live conversations.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Validate the conversation id
//! 2. Upgrade to WebSocket
//! 3. Subscribe the socket to the conversation's channel
//! 4. Relay client commands and broadcast events until disconnect
//! 5. Unsubscribe

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::adapters::broadcast::ChannelDeliveryHandle;
use crate::adapters::http::{ApiError, AppState};
use crate::application::{ChatService, JoinConversationCommand, SendMessageCommand};
use crate::domain::foundation::{ConversationId, ErrorCode, ParticipantId, Timestamp};

use super::messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, MessageFrame, PongMessage, ServerMessage,
};

/// Direct replies (pong, errors) queued ahead of the socket writer.
const REPLY_BUFFER: usize = 16;

/// Handle WebSocket upgrade requests for a conversation.
///
/// Route: `GET /ws/conversations/:conversation_id`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(conversation_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let conversation_id = match ConversationId::parse(conversation_id) {
        Ok(id) => id,
        Err(e) => return ApiError::from(e).into_response(),
    };

    ws.on_upgrade(move |socket| handle_socket(socket, conversation_id, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. Broadcast events arrive through a
/// bounded queue owned by this socket, so a slow client only loses its own
/// events and never delays the publisher.
async fn handle_socket(socket: WebSocket, conversation_id: ConversationId, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let client_id = Uuid::new_v4().to_string();

    let (delivery, mut events_rx) =
        ChannelDeliveryHandle::new(format!("ws-{}", client_id), state.subscriber_buffer);
    let token = state
        .chat
        .broadcaster()
        .subscribe(&conversation_id, Arc::new(delivery))
        .await;

    tracing::debug!(
        conversation_id = %conversation_id,
        client_id = %client_id,
        "WebSocket subscribed"
    );

    let connected = ServerMessage::Connected(ConnectedMessage {
        conversation_id: conversation_id.to_string(),
        client_id: client_id.clone(),
        timestamp: Timestamp::now().to_rfc3339(),
    });
    if let Err(e) = send_message(&mut sender, &connected).await {
        tracing::debug!(client_id = %client_id, "Failed to send connected message: {}", e);
        state.chat.broadcaster().unsubscribe(&token).await;
        return;
    }

    let (reply_tx, mut reply_rx) = mpsc::channel::<ServerMessage>(REPLY_BUFFER);

    // Forward broadcast events and direct replies to the client
    let mut send_task = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            loop {
                let outgoing = tokio::select! {
                    Some(event) = events_rx.recv() => {
                        ServerMessage::Message(MessageFrame { message: event })
                    }
                    Some(reply) = reply_rx.recv() => reply,
                    else => break,
                };
                if let Err(e) = send_message(&mut sender, &outgoing).await {
                    tracing::debug!(
                        client_id = %client_id,
                        "Send error, closing connection: {}",
                        e
                    );
                    break;
                }
            }
        })
    };

    // Handle incoming messages from client
    let mut recv_task = {
        let client_id = client_id.clone();
        let chat = state.chat.clone();
        let conversation_id = conversation_id.clone();
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let reply = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(command) => {
                                handle_client_message(&chat, &conversation_id, command).await
                            }
                            Err(e) => Some(error_message(
                                ErrorCode::ValidationFailed,
                                format!("Invalid message: {}", e),
                            )),
                        };
                        if let Some(reply) = reply {
                            if reply_tx.send(reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(
                            client_id = %client_id,
                            "Received unsupported binary message"
                        );
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // Protocol-level heartbeats are answered by axum
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(client_id = %client_id, "Client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(client_id = %client_id, "Receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.chat.broadcaster().unsubscribe(&token).await;
    tracing::debug!(
        conversation_id = %conversation_id,
        client_id = %client_id,
        "WebSocket closed"
    );
}

/// Applies one client command. Returns a direct reply, if any.
///
/// Accepted chat and join events reach this client through its own
/// subscription, like every other subscriber.
async fn handle_client_message(
    chat: &ChatService,
    conversation_id: &ConversationId,
    command: ClientMessage,
) -> Option<ServerMessage> {
    match command {
        ClientMessage::Ping => Some(ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })),
        ClientMessage::Join { sender } => match ParticipantId::parse(sender) {
            Ok(participant) => {
                chat.on_join(JoinConversationCommand::new(
                    conversation_id.clone(),
                    participant,
                ))
                .await;
                None
            }
            Err(e) => Some(error_message(ErrorCode::ValidationFailed, e.to_string())),
        },
        ClientMessage::Send { sender, content } => match ParticipantId::parse(sender) {
            Ok(sender) => {
                chat.on_send(SendMessageCommand::new(
                    conversation_id.clone(),
                    sender,
                    content,
                ))
                .await;
                None
            }
            Err(e) => Some(error_message(ErrorCode::ValidationFailed, e.to_string())),
        },
    }
}

fn error_message(code: ErrorCode, message: impl Into<String>) -> ServerMessage {
    ServerMessage::Error(ErrorMessage {
        code: code.to_string(),
        message: message.into(),
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> Router<AppState> {
    Router::new().route("/ws/conversations/:conversation_id", get(ws_handler))
}
