use crate::vision::LabelResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Kind of media a label record was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Image,
    Video,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "Image"),
            MediaType::Video => write!(f, "Video"),
        }
    }
}

/// A normalized label result as stored in the label table.
///
/// Serializes to one flat document: the label result's own fields next to
/// `id`, `mediaType`, `mediaName` and `mediaBucket`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecord {
    pub id: Uuid,
    pub media_type: MediaType,
    pub media_name: String,
    pub media_bucket: String,
    #[serde(flatten)]
    pub labels: LabelResult,
}

impl LabelRecord {
    /// The record as a flat JSON document
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(serde::ser::Error::custom("label record is not an object")),
        }
    }
}
