//! Axum routes for file endpoints.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{delete_file, download_file, file_info, health, list_files, upload_file};
use crate::adapters::http::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Creates routes for file endpoints, to be nested under `/api/files`.
///
/// REST Endpoints:
/// - POST /upload - Upload a file (multipart field `file`)
/// - GET / - List stored files
/// - GET /health - Health check
/// - GET /download/:name - Download a file
/// - GET /:name - File metadata
/// - DELETE /delete/:name - Delete a file
pub fn file_routes(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/", get(list_files))
        .route("/health", get(health))
        .route("/download/:name", get(download_file))
        .route("/delete/:name", delete(delete_file))
        .route("/:name", get(file_info))
}
