//! Axum routes for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_conversation, get_history, get_participants, join_conversation, resolve_direct,
    send_message,
};
use crate::adapters::http::state::AppState;

/// Creates routes for per-conversation endpoints, to be nested under `/api/chat`.
///
/// Every path segment here is a conversation id, so no id is ever shadowed
/// by a fixed route.
///
/// REST Endpoints:
/// - GET /:conversation_id - Message history
/// - GET /:conversation_id/participants - Participant list
/// - POST /:conversation_id/join - Join a conversation
/// - POST /:conversation_id/messages - Send a message
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/:conversation_id", get(get_history))
        .route("/:conversation_id/participants", get(get_participants))
        .route("/:conversation_id/join", post(join_conversation))
        .route("/:conversation_id/messages", post(send_message))
}

/// Creates routes that resolve conversation ids, to be nested under
/// `/api/conversations`.
///
/// REST Endpoints:
/// - POST / - Get or create a conversation
/// - POST /direct - Resolve the direct conversation of two users
pub fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_conversation))
        .route("/direct", post(resolve_direct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::test_support::{json_body, test_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .nest("/api/chat", chat_routes())
            .nest("/api/conversations", conversation_routes())
            .with_state(test_state())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn history_of_unknown_conversation_is_empty_success() {
        let response = app().oneshot(get("/api/chat/ghost")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, json!({"success": true, "data": []}));
    }

    #[tokio::test]
    async fn join_then_send_shows_up_in_history() {
        let app = app();

        let joined = app
            .clone()
            .oneshot(post_json("/api/chat/c1/join", json!({"sender": "alice"})))
            .await
            .unwrap();
        assert_eq!(joined.status(), StatusCode::OK);
        assert_eq!(json_body(joined).await["data"]["joined"], true);

        let sent = app
            .clone()
            .oneshot(post_json(
                "/api/chat/c1/messages",
                json!({"sender": "alice", "content": "hello"}),
            ))
            .await
            .unwrap();
        let sent = json_body(sent).await;
        assert_eq!(sent["data"]["content"], "hello");
        assert!(sent["data"]["timestamp"].is_string());

        let history = json_body(app.oneshot(get("/api/chat/c1")).await.unwrap()).await;
        let types: Vec<&str> = history["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["JOIN", "CHAT"]);
    }

    #[tokio::test]
    async fn empty_sender_is_rejected() {
        let response = app()
            .oneshot(post_json("/api/chat/c1/messages", json!({"sender": "", "content": "x"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn participants_are_sorted() {
        let app = app();
        for sender in ["carol", "alice", "bob"] {
            app.clone()
                .oneshot(post_json("/api/chat/room/join", json!({"sender": sender})))
                .await
                .unwrap();
        }

        let body = json_body(app.oneshot(get("/api/chat/room/participants")).await.unwrap()).await;
        assert_eq!(body["data"], json!(["alice", "bob", "carol"]));
    }

    #[tokio::test]
    async fn direct_conversation_is_order_independent() {
        let app = app();

        let first = json_body(
            app.clone()
                .oneshot(post_json("/api/conversations/direct", json!({"userA": "alice", "userB": "bob"})))
                .await
                .unwrap(),
        )
        .await;
        let second = json_body(
            app.oneshot(post_json("/api/conversations/direct", json!({"userA": "bob", "userB": "alice"})))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first["data"]["conversationId"], second["data"]["conversationId"]);
    }

    #[tokio::test]
    async fn create_conversation_without_body_generates_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/conversations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["conversationId"].as_str().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn create_conversation_with_id_echoes_it() {
        let body = json_body(
            app()
                .oneshot(post_json("/api/conversations", json!({"id": "lobby"})))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["data"]["conversationId"], "lobby");
    }

    #[tokio::test]
    async fn ids_matching_resolver_paths_are_ordinary_conversations() {
        let app = app();

        for id in ["direct", "conversations"] {
            let sent = app
                .clone()
                .oneshot(post_json(
                    &format!("/api/chat/{id}/messages"),
                    json!({"sender": "alice", "content": id}),
                ))
                .await
                .unwrap();
            assert_eq!(sent.status(), StatusCode::OK);

            let response = app
                .clone()
                .oneshot(get(&format!("/api/chat/{id}")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let history = json_body(response).await;
            assert_eq!(history["success"], true);
            assert_eq!(history["data"][0]["content"], id);
        }
    }

    #[tokio::test]
    async fn unknown_id_named_direct_reads_as_empty() {
        let response = app().oneshot(get("/api/chat/direct")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"success": true, "data": []}));
    }
}
