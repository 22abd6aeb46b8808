use thiserror::Error;

/// Errors that can occur when publishing to the notification bus
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to publish to {topic}: {message}")]
    Publish { topic: String, message: String },

    #[error("Notification topic is not configured")]
    MissingTopic,

    #[error("Failed to encode notification: {0}")]
    Encoding(#[from] serde_json::Error),
}
