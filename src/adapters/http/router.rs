//! Top-level router assembly.

use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::chat::{chat_routes, conversation_routes};
use super::files::file_routes;
use super::state::AppState;
use crate::adapters::websocket::websocket_router;
use crate::config::{AppConfig, CorsPolicy, ServerConfig};

/// Builds the full application: chat REST, file REST and the WebSocket endpoint.
pub fn app_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .nest("/api/chat", chat_routes())
        .nest("/api/conversations", conversation_routes())
        .nest("/api/files", file_routes(config.storage.max_upload_bytes))
        .merge(websocket_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.server))
                .layer(TimeoutLayer::new(config.server.request_timeout()))
                .into_inner(),
        )
        .with_state(state)
}

/// Any origin unless specific origins are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins = match server.cors_policy() {
        CorsPolicy::Any => return layer.allow_origin(Any),
        CorsPolicy::Origins(origins) => origins,
    };

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}
