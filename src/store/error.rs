use thiserror::Error;

/// Errors that can occur when writing label records
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write record {id} to table {table}: {message}")]
    Write {
        table: String,
        id: String,
        message: String,
    },

    #[error("Label table is not configured")]
    MissingTable,

    #[error("Failed to encode record: {0}")]
    Encoding(#[from] serde_json::Error),
}
