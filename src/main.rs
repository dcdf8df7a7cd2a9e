use std::sync::Arc;

use chat_relay::adapters::{
    app_router, AppState, InMemoryBroadcaster, InMemoryConversationRegistry, InMemoryObjectStore,
    LocalObjectStore,
};
use chat_relay::application::{ChatService, FileService};
use chat_relay::config::{AppConfig, StorageBackend};
use chat_relay::domain::files::UploadPolicy;
use chat_relay::ports::ObjectStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let store: Arc<dyn ObjectStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryObjectStore::new(&config.storage.container)),
        StorageBackend::Local => Arc::new(LocalObjectStore::new(
            &config.storage.root_dir,
            &config.storage.container,
        )),
    };
    store.ensure_container(&config.storage.container).await?;

    let chat = ChatService::new(
        Arc::new(InMemoryConversationRegistry::new()),
        Arc::new(InMemoryBroadcaster::new(config.chat.delivery_timeout())),
    );
    let files = FileService::new(store, UploadPolicy::new(config.storage.max_upload_bytes));
    let state = AppState::new(chat, files).with_subscriber_buffer(config.chat.subscriber_buffer);

    let app = app_router(state, &config);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        storage = ?config.storage.backend,
        container = %config.storage.container,
        "Chat relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Chat relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
