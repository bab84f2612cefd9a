//! Backup of the archived tree to object storage
//!
//! Uploads go through the [`Uploader`] trait; [`S3Uploader`] is the
//! implementation used by the binary. A single attempt is made per upload.

mod s3;

pub use s3::S3Uploader;

use async_trait::async_trait;
use std::path::Path;

/// Destination for archive uploads
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload the local file at `path` to `bucket` under `key`
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if `path` does not exist
    /// - [`Error::Upload`](crate::Error::Upload) if the remote call fails
    async fn upload(&self, path: &Path, bucket: &str, key: &str) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}
