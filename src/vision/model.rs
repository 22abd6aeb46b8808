//! Serializable mirror of the Rekognition label responses.
//!
//! Field names follow the service's wire format so stored records look the
//! same whether they came from the SDK or from a notification payload.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageLabels {
    pub labels: Vec<LabelEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation_correction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_model_version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoLabels {
    pub job_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_metadata: Option<VideoMetadata>,
    pub labels: Vec<TimedLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_model_version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelEntry {
    pub name: Option<String>,
    pub confidence: Option<f64>,
    pub instances: Vec<Instance>,
    pub parents: Vec<NamedRef>,
    pub aliases: Vec<NamedRef>,
    pub categories: Vec<NamedRef>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub left: Option<f64>,
    pub top: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimedLabel {
    pub timestamp: i64,
    pub label: Option<LabelEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp_millis: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp_millis: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoMetadata {
    pub codec: Option<String>,
    pub duration_millis: Option<i64>,
    pub format: Option<String>,
    pub frame_rate: Option<f64>,
    pub frame_height: Option<i64>,
    pub frame_width: Option<i64>,
}

/// Widen an `f32` score without picking up binary noise, so `98.7` stays
/// `98.7` instead of becoming `98.69999694824219`.
pub fn widen(value: f32) -> f64 {
    // f32 Display prints the shortest form that round-trips, so parse that
    value.to_string().parse().unwrap_or(value as f64)
}
