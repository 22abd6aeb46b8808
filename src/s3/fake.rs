use crate::s3::error::StorageError;
use crate::s3::storage::Storage;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// `FakeStorage` is an in-memory implementation of the `Storage` trait for testing purposes.
/// Objects are keyed by `bucket/key`.
#[derive(Clone, Default)]
pub struct FakeStorage {
    data: Arc<Mutex<HashMap<String, Bytes>>>,
    fail_objects: Arc<Mutex<HashSet<String>>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a failure for a specific object key
    pub async fn fake_fail_object(&self, key: &str) {
        let mut fail_objects = self.fail_objects.lock().await;
        fail_objects.insert(key.to_string());
    }

    pub async fn get_object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        let data = self.data.lock().await;
        data.get(&format!("{}/{}", bucket, key)).cloned()
    }

    /// All stored `bucket/key` names, sorted
    pub async fn object_names(&self) -> Vec<String> {
        let data = self.data.lock().await;
        let mut names: Vec<String> = data.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        if self.fail_objects.lock().await.contains(key) {
            return Err(StorageError::UploadError(
                key.to_string(),
                "Simulated upload failure".to_string(),
            ));
        }

        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::LocalFile(path.display().to_string(), e.to_string()))?;

        let mut data = self.data.lock().await;
        data.insert(format!("{}/{}", bucket, key), Bytes::from(contents));
        Ok(())
    }
}
