//! Integration tests for the assembled HTTP application.
//!
//! Builds the full router the way the binary does, backed by a
//! disk object store in a temporary directory.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use chat_relay::adapters::{
    app_router, AppState, InMemoryBroadcaster, InMemoryConversationRegistry, LocalObjectStore,
};
use chat_relay::application::{ChatService, FileService};
use chat_relay::config::AppConfig;
use chat_relay::domain::files::UploadPolicy;

const BOUNDARY: &str = "integration-boundary";

fn app(root: &TempDir) -> Router {
    let config = AppConfig::default();
    let chat = ChatService::new(
        Arc::new(InMemoryConversationRegistry::new()),
        Arc::new(InMemoryBroadcaster::new(config.chat.delivery_timeout())),
    );
    let files = FileService::new(
        Arc::new(LocalObjectStore::new(root.path(), "uploads")),
        UploadPolicy::new(config.storage.max_upload_bytes),
    );
    app_router(AppState::new(chat, files), &config)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn chat_scenario_over_http() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    for sender in ["alice", "bob"] {
        let response = app
            .clone()
            .oneshot(post_json("/api/chat/c1/join", json!({ "sender": sender })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    app.clone()
        .oneshot(post_json(
            "/api/chat/c1/messages",
            json!({"sender": "alice", "content": "hi"}),
        ))
        .await
        .unwrap();

    let history = json_body(app.clone().oneshot(get("/api/chat/c1")).await.unwrap()).await;
    assert_eq!(history["success"], true);
    let entries: Vec<(String, String)> = history["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["type"].as_str().unwrap().to_string(),
                m["sender"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        entries,
        vec![
            ("JOIN".to_string(), "alice".to_string()),
            ("JOIN".to_string(), "bob".to_string()),
            ("CHAT".to_string(), "alice".to_string()),
        ]
    );

    let participants =
        json_body(app.oneshot(get("/api/chat/c1/participants")).await.unwrap()).await;
    assert_eq!(participants["data"], json!(["alice", "bob"]));
}

#[tokio::test]
async fn file_lifecycle_on_disk() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"\xff\xd8\xff\xe0 fake jpeg");
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let uploaded = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/files/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(uploaded.status(), StatusCode::OK);
    let name = json_body(uploaded).await["data"]["fileName"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(name.ends_with(".jpg"));
    assert!(temp.path().join("uploads").join("data").join(&name).exists());

    let info = json_body(
        app.clone()
            .oneshot(get(&format!("/api/files/{}", name)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(info["data"]["contentType"], "image/jpeg");

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/files/delete/{}", name))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let missing = app
        .oneshot(get(&format!("/api/files/download/{}", name)))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
