pub mod dynamo;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod label_store;
pub mod models;

pub use dynamo::DynamoLabelStore;
pub use error::StoreError;
#[cfg(test)]
pub use fake::FakeLabelStore;
pub use label_store::LabelStore;
pub use models::{LabelRecord, MediaType};
