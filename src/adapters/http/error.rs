//! Response envelopes and API error mapping shared by all HTTP handlers.
//!
//! Success bodies are `{"success": true, "data": ...}`; failures are
//! `{"success": false, "code": ..., "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::application::FileServiceError;
use crate::domain::files::UploadRejection;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

// ════════════════════════════════════════════════════════════════════════════════
// Success Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Standard success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data,
        })
    }

    pub fn ok_with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            success: false,
            code: err.code().to_string(),
            message: err.message.clone(),
            details: err
                .details
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::ObjectNotFound, message))
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::PayloadTooLarge, message))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::InternalError, message))
    }

    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }

    fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::ValidationFailed | ErrorCode::InvalidIdentifier => StatusCode::BAD_REQUEST,
            ErrorCode::ObjectNotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::StorageError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<FileServiceError> for ApiError {
    fn from(err: FileServiceError) -> Self {
        match err {
            FileServiceError::Rejected(rejection @ UploadRejection::Empty) => {
                Self::bad_request(rejection.to_string())
            }
            FileServiceError::Rejected(rejection @ UploadRejection::TooLarge { .. }) => {
                Self::payload_too_large(rejection.to_string())
            }
            FileServiceError::InvalidName(e) => Self(
                DomainError::new(ErrorCode::InvalidIdentifier, e.to_string())
                    .with_detail("field", e.field()),
            ),
            FileServiceError::NotFound(key) => Self::not_found(format!("File not found: {}", key)),
            FileServiceError::Storage(e) => {
                Self(DomainError::new(ErrorCode::StorageError, e.to_string()))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::from(&self.0);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code(), "Internal error: {}", self.0.message);
            body.message = "An internal error occurred".to_string();
            body.details.clear();
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StorageError;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err: ApiError = ValidationError::empty_field("sender").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn file_errors_map_to_statuses() {
        let too_large: ApiError =
            FileServiceError::Rejected(UploadRejection::TooLarge { size: 2, limit: 1 }).into();
        assert_eq!(too_large.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let missing: ApiError = FileServiceError::NotFound("a.png".to_string()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let storage: ApiError = FileServiceError::Storage(StorageError::io("disk")).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_carries_code_and_details() {
        let err = DomainError::validation("sender", "Field 'sender' cannot be empty");
        let body = ErrorResponse::from(&err);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert_eq!(json["details"]["field"], "sender");
    }

    #[test]
    fn success_envelope_omits_missing_message() {
        let Json(envelope) = ApiResponse::ok(vec![1, 2]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }
}
