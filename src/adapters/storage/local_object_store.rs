//! Local Filesystem Object Store Adapter
//!
//! Stores each container as a directory and each object as a file, with its
//! metadata in a JSON sidecar.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::validate_container_name;
use crate::domain::files::{content_etag, ObjectBody, ObjectInfo, DEFAULT_CONTENT_TYPE};
use crate::domain::foundation::{ObjectKey, Timestamp};
use crate::ports::{ObjectStore, StorageError};

const DATA_DIR: &str = "data";
const META_DIR: &str = "meta";
const TMP_DIR: &str = "tmp";

/// Sidecar metadata written next to every object.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMeta {
    content_type: String,
    size: u64,
    etag: String,
    last_modified: Timestamp,
}

/// Object store rooted in a local directory.
///
/// # Directory Structure
///
/// ```text
/// {root}/
/// └── chat-uploads/
///     ├── data/
///     │   └── 2f1c...e9.jpg
///     ├── meta/
///     │   └── 2f1c...e9.jpg.meta
///     └── tmp/
/// ```
///
/// # Atomic Writes
///
/// Content and metadata are each written to a unique file under `tmp/`,
/// synced, then renamed into place. Readers never see a partial object.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    container: String,
}

impl LocalObjectStore {
    /// Creates a store bound to `container` under `root`.
    ///
    /// Nothing touches the disk until `ensure_container` or `put`.
    pub fn new(root: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            container: container.into(),
        }
    }

    fn container_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn data_path(&self, key: &ObjectKey) -> PathBuf {
        self.container_dir(&self.container)
            .join(DATA_DIR)
            .join(key.as_str())
    }

    fn meta_path(&self, key: &ObjectKey) -> PathBuf {
        self.container_dir(&self.container)
            .join(META_DIR)
            .join(format!("{}.meta", key.as_str()))
    }

    fn temp_path(&self) -> PathBuf {
        self.container_dir(&self.container)
            .join(TMP_DIR)
            .join(Uuid::new_v4().to_string())
    }

    async fn container_exists(&self) -> bool {
        fs::metadata(self.container_dir(&self.container).join(DATA_DIR))
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    /// Writes `bytes` to a temp file, syncs it, and renames it to `target`.
    async fn write_atomic(&self, target: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let temp_path = self.temp_path();

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.write_all(bytes).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                target.display(),
                e
            )));
        }
        Ok(())
    }

    async fn read_meta(&self, key: &ObjectKey) -> Result<Option<ObjectMeta>, StorageError> {
        let path = self.meta_path(key);
        match fs::read(&path).await {
            Ok(raw) => serde_json::from_slice(&raw)
                .map(Some)
                .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Builds metadata for an object, falling back to the file itself when
    /// the sidecar is missing.
    async fn info_for(
        &self,
        key: &ObjectKey,
        bytes: Option<&[u8]>,
    ) -> Result<ObjectInfo, StorageError> {
        let path = self.data_path(key);
        let file_meta = fs::metadata(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::io(format!(
                "Failed to get metadata for {}: {}",
                path.display(),
                e
            )),
        })?;

        if let Some(meta) = self.read_meta(key).await? {
            return Ok(ObjectInfo {
                key: key.clone(),
                size: meta.size,
                content_type: meta.content_type,
                last_modified: meta.last_modified,
                etag: meta.etag,
            });
        }

        tracing::debug!(key = %key, "Object has no metadata sidecar");
        let etag = match bytes {
            Some(bytes) => content_etag(bytes),
            None => content_etag(&fs::read(&path).await.map_err(|e| {
                StorageError::io(format!("Failed to read {}: {}", path.display(), e))
            })?),
        };
        let last_modified = file_meta
            .modified()
            .map(Timestamp::from)
            .unwrap_or_else(|_| Timestamp::now());

        Ok(ObjectInfo {
            key: key.clone(),
            size: file_meta.len(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            last_modified,
            etag,
        })
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn ensure_container(&self, name: &str) -> Result<(), StorageError> {
        validate_container_name(name)?;
        let dir = self.container_dir(name);
        for sub in [DATA_DIR, META_DIR, TMP_DIR] {
            let path = dir.join(sub);
            fs::create_dir_all(&path).await.map_err(|e| {
                StorageError::io(format!(
                    "Failed to create container directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    async fn put(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ObjectKey, StorageError> {
        if !self.container_exists().await {
            return Err(StorageError::ContainerMissing(self.container.clone()));
        }

        let meta = ObjectMeta {
            content_type: content_type.to_string(),
            size: bytes.len() as u64,
            etag: content_etag(&bytes),
            last_modified: Timestamp::now(),
        };
        let meta_json = serde_json::to_vec(&meta)
            .map_err(|e| StorageError::io(format!("Failed to encode metadata: {}", e)))?;

        self.write_atomic(&self.data_path(key), &bytes).await?;
        self.write_atomic(&self.meta_path(key), &meta_json).await?;

        tracing::debug!(
            container = %self.container,
            key = %key,
            size = meta.size,
            "Object stored"
        );
        Ok(key.clone())
    }

    async fn get(&self, key: &ObjectKey) -> Result<ObjectBody, StorageError> {
        let path = self.data_path(key);
        let bytes = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::io(format!("Failed to read {}: {}", path.display(), e)),
        })?;
        let info = self.info_for(key, Some(&bytes)).await?;
        Ok(ObjectBody { info, bytes })
    }

    async fn stat(&self, key: &ObjectKey) -> Result<ObjectInfo, StorageError> {
        self.info_for(key, None).await
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), StorageError> {
        for path in [self.data_path(key), self.meta_path(key)] {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(StorageError::io(format!(
                        "Failed to delete {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectKey>, StorageError> {
        let dir = self.container_dir(&self.container).join(DATA_DIR);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::io(format!(
                    "Failed to read container directory {}: {}",
                    dir.display(),
                    e
                )))
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(format!("Failed to read directory entry: {}", e)))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) {
                continue;
            }
            if let Ok(key) = ObjectKey::new(name) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn container(&self) -> &str {
        &self.container
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
