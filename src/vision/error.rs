use thiserror::Error;

/// Errors returned by the vision labeling service
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown labeling job: {0}")]
    #[cfg(test)]
    UnknownJob(String),

    #[error("Failed to encode label result: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl VisionError {
    pub fn request(operation: &'static str, err: impl std::fmt::Display) -> Self {
        VisionError::Request {
            operation,
            message: err.to_string(),
        }
    }
}
