//! Files domain - metadata of stored objects and upload rules.

mod object;
mod upload;

pub use object::{content_etag, ObjectBody, ObjectInfo, DEFAULT_CONTENT_TYPE};
pub use upload::{UploadPolicy, UploadRejection};
