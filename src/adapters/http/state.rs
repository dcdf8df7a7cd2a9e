//! Shared application state for HTTP and WebSocket handlers.

use crate::application::{ChatService, FileService};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub files: FileService,
    /// Queue depth for each WebSocket subscriber.
    pub subscriber_buffer: usize,
}

impl AppState {
    pub fn new(chat: ChatService, files: FileService) -> Self {
        Self {
            chat,
            files,
            subscriber_buffer: 64,
        }
    }

    pub fn with_subscriber_buffer(mut self, subscriber_buffer: usize) -> Self {
        self.subscriber_buffer = subscriber_buffer.max(1);
        self
    }
}
