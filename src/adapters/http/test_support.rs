//! Helpers shared by router tests.

use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;

use super::state::AppState;
use crate::adapters::broadcast::InMemoryBroadcaster;
use crate::adapters::registry::InMemoryConversationRegistry;
use crate::adapters::storage::InMemoryObjectStore;
use crate::application::{ChatService, FileService};
use crate::domain::files::UploadPolicy;

/// Fresh in-memory state with a 1 KiB upload limit.
pub fn test_state() -> AppState {
    let chat = ChatService::new(
        Arc::new(InMemoryConversationRegistry::new()),
        Arc::new(InMemoryBroadcaster::default()),
    );
    let files = FileService::new(
        Arc::new(InMemoryObjectStore::new("test-uploads")),
        UploadPolicy::new(1024),
    );
    AppState::new(chat, files)
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
