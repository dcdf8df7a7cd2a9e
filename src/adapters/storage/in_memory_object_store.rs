//! In-Memory Object Store Adapter
//!
//! Keeps containers and their objects in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::validate_container_name;
use crate::domain::files::{content_etag, ObjectBody, ObjectInfo};
use crate::domain::foundation::{ObjectKey, Timestamp};
use crate::ports::{ObjectStore, StorageError};

type Container = BTreeMap<ObjectKey, ObjectBody>;

/// In-memory object store bound to one container.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStore {
    container: String,
    containers: Arc<RwLock<HashMap<String, Container>>>,
}

impl InMemoryObjectStore {
    /// Create a store bound to `container`. The container is not created yet.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            containers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of objects in the bound container
    pub async fn object_count(&self) -> usize {
        self.containers
            .read()
            .await
            .get(&self.container)
            .map(|objects| objects.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn ensure_container(&self, name: &str) -> Result<(), StorageError> {
        validate_container_name(name)?;
        self.containers
            .write()
            .await
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    async fn put(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ObjectKey, StorageError> {
        let mut containers = self.containers.write().await;
        let objects = containers
            .get_mut(&self.container)
            .ok_or_else(|| StorageError::ContainerMissing(self.container.clone()))?;

        let info = ObjectInfo {
            key: key.clone(),
            size: bytes.len() as u64,
            content_type: content_type.to_string(),
            last_modified: Timestamp::now(),
            etag: content_etag(&bytes),
        };
        objects.insert(key.clone(), ObjectBody { info, bytes });
        Ok(key.clone())
    }

    async fn get(&self, key: &ObjectKey) -> Result<ObjectBody, StorageError> {
        self.containers
            .read()
            .await
            .get(&self.container)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn stat(&self, key: &ObjectKey) -> Result<ObjectInfo, StorageError> {
        self.containers
            .read()
            .await
            .get(&self.container)
            .and_then(|objects| objects.get(key))
            .map(|body| body.info.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), StorageError> {
        if let Some(objects) = self.containers.write().await.get_mut(&self.container) {
            objects.remove(key);
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectKey>, StorageError> {
        Ok(self
            .containers
            .read()
            .await
            .get(&self.container)
            .map(|objects| {
                objects
                    .keys()
                    .filter(|key| key.as_str().starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn container(&self) -> &str {
        &self.container
    }
}
