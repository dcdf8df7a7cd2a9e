//! HTTP adapter for file endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{DeletedFileResponse, FileHealthResponse, UploadedFileResponse};
pub use routes::file_routes;
