//! ObjectStore port - Blob storage for uploaded files.
//!
//! Objects live in a named container (bucket). Stores are bound to one
//! container; `ensure_container` creates it on demand.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::files::{ObjectBody, ObjectInfo};
use crate::domain::foundation::ObjectKey;

/// Errors that can occur during object storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Container does not exist: {0}")]
    ContainerMissing(String),

    #[error("Invalid container name: {0}")]
    InvalidContainer(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Corrupt object metadata: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

/// Port for the external object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Creates the container if it does not exist yet.
    async fn ensure_container(&self, name: &str) -> Result<(), StorageError>;

    /// Stores `bytes` under `key`, replacing any previous object.
    async fn put(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ObjectKey, StorageError>;

    /// Reads an object and its metadata.
    async fn get(&self, key: &ObjectKey) -> Result<ObjectBody, StorageError>;

    /// Reads only the metadata.
    async fn stat(&self, key: &ObjectKey) -> Result<ObjectInfo, StorageError>;

    /// Removes an object. Removing a missing object succeeds.
    async fn delete(&self, key: &ObjectKey) -> Result<(), StorageError>;

    /// Keys starting with `prefix`, sorted. Empty prefix lists everything.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectKey>, StorageError>;

    /// Name of the bound container.
    fn container(&self) -> &str;
}
