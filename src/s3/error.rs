use thiserror::Error;

/// Errors that can occur when writing to S3 storage
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Bucket {0} does not exist")]
    NoSuchBucket(String),

    #[error("Access denied for object {0}: {1}")]
    AccessDenied(String, String),

    #[error("Failed to upload object {0}: {1}")]
    UploadError(String, String),

    #[error("Failed to read local file {0}: {1}")]
    LocalFile(String, String),
}
