use thiserror::Error;

/// Errors that abort a harvest run or a single transfer
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("Cannot derive a file name from {0}")]
    InvalidUrl(String),

    #[error("No object storage configured for bucket {0}")]
    MissingStorage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
