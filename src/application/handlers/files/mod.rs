//! File upload and retrieval handling.

mod file_service;

pub use file_service::{FileService, FileServiceError, UploadFileCommand, UploadedFile};
