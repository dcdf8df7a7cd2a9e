//! HTTP DTOs for file endpoints.

use serde::Serialize;

use crate::application::UploadedFile;

/// `data` of a successful upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileResponse {
    /// Key to use with the download, info and delete endpoints.
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub size: u64,
    pub content_type: String,
}

impl From<UploadedFile> for UploadedFileResponse {
    fn from(file: UploadedFile) -> Self {
        Self {
            file_name: file.key.to_string(),
            original_name: file.original_name,
            size: file.size,
            content_type: file.content_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFileResponse {
    pub file_name: String,
}

/// Body of `GET /api/files/health`.
#[derive(Debug, Clone, Serialize)]
pub struct FileHealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub container: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}
