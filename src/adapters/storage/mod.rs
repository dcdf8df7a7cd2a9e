//! Object Storage Adapters
//!
//! Implementations of the ObjectStore port for uploaded files.
//!
//! ## Available Adapters
//!
//! - **LocalObjectStore** - One directory per container on local disk
//! - **InMemoryObjectStore** - Objects kept in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryObjectStore, LocalObjectStore};
//!
//! // Production: disk-backed storage
//! let store = LocalObjectStore::new("./data/objects", "chat-uploads");
//!
//! // Testing: in-memory storage
//! let store = InMemoryObjectStore::new("chat-uploads");
//! ```

mod in_memory_object_store;
mod local_object_store;

pub use in_memory_object_store::InMemoryObjectStore;
pub use local_object_store::LocalObjectStore;

use crate::ports::StorageError;

/// Container names are a single non-empty path segment.
pub(crate) fn validate_container_name(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidContainer(name.to_string()))
    }
}
