//! Object storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which object store adapter to run with
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Local,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Adapter selection
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the local backend
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Container (bucket) that uploads go to
    #[serde(default = "default_container")]
    pub container: String,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_ok = !self.container.is_empty()
            && self
                .container
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && self.container != "."
            && self.container != "..";
        if !name_ok {
            return Err(ValidationError::InvalidContainer(self.container.clone()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        if self.backend == StorageBackend::Local && self.root_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ROOT_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root_dir: default_root_dir(),
            container: default_container(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./data/objects")
}

fn default_container() -> String {
    "chat-uploads".to_string()
}

fn default_max_upload_bytes() -> u64 {
    100 * 1024 * 1024
}
