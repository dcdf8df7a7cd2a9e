//! HTTP handlers for file endpoints.

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::{ApiError, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::UploadFileCommand;
use crate::domain::foundation::Timestamp;

use super::dto::{DeletedFileResponse, FileHealthResponse, UploadedFileResponse};

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(err.body_text())
    } else {
        ApiError::bad_request(err.body_text())
    }
}

/// POST /api/files/upload - Store the multipart field `file`.
///
/// # Errors
/// - 400 Bad Request: no `file` field, or the file is empty
/// - 413 Payload Too Large: file exceeds the configured limit
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let uploaded = state
            .files
            .upload(UploadFileCommand {
                original_name,
                content_type,
                bytes: bytes.to_vec(),
            })
            .await?;

        return Ok(ApiResponse::ok_with_message(
            "File uploaded successfully",
            UploadedFileResponse::from(uploaded),
        ));
    }

    Err(ApiError::bad_request("No file provided"))
}

/// GET /api/files - Names of all stored files.
pub async fn list_files(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let names: Vec<String> = state
        .files
        .list()
        .await?
        .into_iter()
        .map(|key| key.to_string())
        .collect();
    Ok(ApiResponse::ok(names))
}

/// GET /api/files/download/:name - Raw file content as an attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let body = state.files.download(&name).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &body.info.content_type)
        .header(header::CONTENT_LENGTH, body.info.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", body.info.key),
        )
        .header(header::ETAG, format!("\"{}\"", body.info.etag))
        .body(Body::from(body.bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build download response: {}", e)))
}

/// GET /api/files/:name - Object metadata.
pub async fn file_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let info = state.files.info(&name).await?;
    Ok(ApiResponse::ok(info))
}

/// DELETE /api/files/delete/:name - Remove a file. Missing files succeed.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let key = state.files.delete(&name).await?;
    Ok(ApiResponse::ok_with_message(
        "File deleted successfully",
        DeletedFileResponse {
            file_name: key.to_string(),
        },
    ))
}

/// GET /api/files/health - Liveness of the file service.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(FileHealthResponse {
        status: "UP",
        service: "chat-relay file service",
        container: state.files.container().to_string(),
        timestamp: Timestamp::now().as_unix_millis(),
    })
}
