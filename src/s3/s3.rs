use crate::s3::error::StorageError;
use crate::s3::storage::Storage;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;
use tracing::{debug, info};

/// Real S3 implementation of the Storage trait
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Create a new S3Storage from the shared SDK configuration.
    ///
    /// A custom endpoint (MinIO, LocalStack) switches to path-style requests.
    pub fn new(sdk_config: &SdkConfig, endpoint: Option<&str>) -> Self {
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(sdk_config);

        if let Some(endpoint) = endpoint {
            info!("Setting custom S3 endpoint: {}", endpoint);
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }

        let client = Client::from_conf(s3_config_builder.build());
        info!("Created S3 client for region {:?}", sdk_config.region());

        Self { client }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        debug!("Uploading {} to s3://{}/{}", path.display(), bucket, key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::LocalFile(path.display().to_string(), e.to_string()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                if message.contains("NoSuchBucket") {
                    StorageError::NoSuchBucket(bucket.to_string())
                } else if message.contains("AccessDenied") {
                    StorageError::AccessDenied(key.to_string(), message)
                } else {
                    StorageError::UploadError(key.to_string(), message)
                }
            })?;

        Ok(())
    }
}
