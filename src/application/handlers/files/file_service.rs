//! FileService - Upload, listing and retrieval of stored files.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::files::{
    ObjectBody, ObjectInfo, UploadPolicy, UploadRejection, DEFAULT_CONTENT_TYPE,
};
use crate::domain::foundation::{ObjectKey, ValidationError};
use crate::ports::{ObjectStore, StorageError};

/// Errors from file operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileServiceError {
    #[error("{0}")]
    Rejected(#[from] UploadRejection),

    #[error("Invalid file name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for FileServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => FileServiceError::NotFound(key),
            other => FileServiceError::Storage(other),
        }
    }
}

/// Command to store an uploaded file.
#[derive(Debug, Clone)]
pub struct UploadFileCommand {
    pub original_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Generated storage key.
    pub key: ObjectKey,
    pub original_name: Option<String>,
    pub size: u64,
    pub content_type: String,
}

/// Application service over the object store.
#[derive(Clone)]
pub struct FileService {
    store: Arc<dyn ObjectStore>,
    policy: UploadPolicy,
}

impl FileService {
    pub fn new(store: Arc<dyn ObjectStore>, policy: UploadPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    pub fn container(&self) -> &str {
        self.store.container()
    }

    /// Validates and stores an upload under a freshly generated key.
    pub async fn upload(&self, cmd: UploadFileCommand) -> Result<UploadedFile, FileServiceError> {
        let size = cmd.bytes.len() as u64;
        self.policy.check(size)?;

        self.store.ensure_container(self.store.container()).await?;

        let key = ObjectKey::for_upload(cmd.original_name.as_deref());
        let content_type = cmd
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let key = self.store.put(&key, cmd.bytes, &content_type).await?;

        tracing::info!(
            key = %key,
            size,
            content_type = %content_type,
            "File uploaded"
        );

        Ok(UploadedFile {
            key,
            original_name: cmd.original_name,
            size,
            content_type,
        })
    }

    /// All stored file names, sorted.
    pub async fn list(&self) -> Result<Vec<ObjectKey>, FileServiceError> {
        Ok(self.store.list("").await?)
    }

    pub async fn download(&self, name: &str) -> Result<ObjectBody, FileServiceError> {
        let key = ObjectKey::new(name)?;
        Ok(self.store.get(&key).await?)
    }

    pub async fn info(&self, name: &str) -> Result<ObjectInfo, FileServiceError> {
        let key = ObjectKey::new(name)?;
        Ok(self.store.stat(&key).await?)
    }

    /// Deletes a file. Deleting a missing file succeeds.
    pub async fn delete(&self, name: &str) -> Result<ObjectKey, FileServiceError> {
        let key = ObjectKey::new(name)?;
        self.store.delete(&key).await?;
        tracing::info!(key = %key, "File deleted");
        Ok(key)
    }
}
