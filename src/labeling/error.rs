use crate::notify::NotifyError;
use crate::store::StoreError;
use crate::vision::VisionError;
use thiserror::Error;

/// Errors that fail a labeling batch
#[derive(Error, Debug)]
pub enum LabelingError {
    #[error("Vision service error: {0}")]
    Vision(#[from] VisionError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Label store error: {0}")]
    Store(#[from] StoreError),

    #[error("Malformed event: {0}")]
    InvalidEvent(String),

    #[error("Malformed notification message: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    #[error("Missing labeling setting: {0}")]
    MissingSetting(&'static str),
}
