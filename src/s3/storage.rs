use crate::s3::error::StorageError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Storage trait defining the interface for writing objects to S3-compatible storage
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Upload the file at `path` as `bucket`/`key`
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError>;
}

/// Implementation of Storage trait for Arc<T> where T implements Storage
#[async_trait]
impl<T: Storage + ?Sized> Storage for Arc<T> {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        (**self).put_file(bucket, key, path).await
    }
}
