pub mod error;
#[cfg(test)]
pub mod fake;
pub mod model;
pub mod rekognition;
pub mod service;

pub use error::VisionError;
#[cfg(test)]
pub use fake::{FakeVision, VisionCall};
pub use rekognition::RekognitionVision;
pub use service::{JobChannel, LabelPage, LabelResult, VisionService};
