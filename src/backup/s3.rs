//! S3 uploader

use super::Uploader;
use crate::config::BackupConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use std::path::Path;
use tracing::debug;

/// Uploads archives to an S3 bucket as private objects
///
/// Uses the standard AWS credential chain (env vars, ~/.aws, IAM roles, etc.).
pub struct S3Uploader {
    client: Client,
}

impl S3Uploader {
    /// Create an uploader honoring the region and endpoint overrides in `config`
    pub async fn new(config: &BackupConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;

        // Custom endpoints (MinIO, LocalStack) generally need path-style addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint_url.is_some())
            .build();

        Self {
            client: Client::from_conf(s3_config),
        }
    }
}

#[async_trait]
impl Uploader for S3Uploader {
    async fn upload(&self, path: &Path, bucket: &str, key: &str) -> Result<()> {
        if !tokio::fs::try_exists(path).await? {
            return Err(Error::NotFound(format!(
                "archive {} does not exist",
                path.display()
            )));
        }

        let upload_error = |reason: String| Error::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason,
        };

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        debug!(path = %path.display(), bucket, key, "uploading archive to S3");
        self.client
            .put_object()
            .acl(ObjectCannedAcl::Private)
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| upload_error(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    fn name(&self) -> &str {
        "s3"
    }
}
