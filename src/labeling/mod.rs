pub mod consume;
pub mod error;
pub mod events;
pub mod ingest;
pub mod normalize;

pub use consume::{CompletionHandler, ConsumeReport};
pub use error::LabelingError;
pub use events::{S3Event, SnsEvent};
pub use ingest::{IngestHandler, IngestReport};
