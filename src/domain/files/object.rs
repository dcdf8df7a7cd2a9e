//! Stored object metadata.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::foundation::{ObjectKey, Timestamp};

/// Content type used when the uploader does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata returned by `stat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    pub key: ObjectKey,
    pub size: u64,
    pub content_type: String,
    pub last_modified: Timestamp,
    pub etag: String,
}

/// An object's bytes together with its metadata.
#[derive(Debug, Clone)]
pub struct ObjectBody {
    pub info: ObjectInfo,
    pub bytes: Vec<u8>,
}

/// SHA-256 of the content, lowercase hex. Identical content yields identical tags.
pub fn content_etag(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}
