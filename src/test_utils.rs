use crate::config::{load_config, Config, ImageDispatch, LabelingConfig};
use crate::labeling::{S3Event, SnsEvent};
use crate::vision::LabelResult;
use serde_json::json;

/// Check if a test is enabled via environment variable
fn is_test_enabled(env_var: &str) -> bool {
    std::env::var(env_var)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Check if S3 tests are enabled via environment variable
pub fn is_s3_enabled() -> bool {
    is_test_enabled("ENABLE_S3_TESTS")
}

/// Load test configuration from config.toml
pub fn load_test_config() -> Result<Config, anyhow::Error> {
    load_config("config.toml").map_err(|e| anyhow::anyhow!("Failed to load config.toml: {}", e))
}

/// Bucket used by the real S3 tests, `TEST_S3_BUCKET` or a fixed default
pub fn test_bucket() -> String {
    std::env::var("TEST_S3_BUCKET").unwrap_or_else(|_| "media-label-pipeline-test".to_string())
}

/// Labeling settings with every ARN filled in
pub fn test_labeling_config(dispatch: ImageDispatch) -> LabelingConfig {
    LabelingConfig {
        table_name: "media-labels".to_string(),
        topic_arn: "arn:aws:sns:us-east-1:123456789012:labels".to_string(),
        role_arn: "arn:aws:iam::123456789012:role/rekognition-sns".to_string(),
        image_dispatch: dispatch,
        ..LabelingConfig::default()
    }
}

/// Build an upload event with one record per (bucket, raw key) pair
pub fn s3_event(objects: &[(&str, &str)]) -> S3Event {
    let records: Vec<_> = objects
        .iter()
        .map(|(bucket, key)| {
            json!({
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "s3": {
                    "bucket": {"name": bucket, "arn": format!("arn:aws:s3:::{}", bucket)},
                    "object": {"key": key, "size": 1024}
                }
            })
        })
        .collect();
    serde_json::from_value(json!({ "Records": records })).unwrap()
}

/// Build a notification event carrying the given message bodies
pub fn sns_event(messages: &[String]) -> SnsEvent {
    let records: Vec<_> = messages
        .iter()
        .map(|message| {
            json!({
                "EventSource": "aws:sns",
                "Sns": {"Type": "Notification", "Message": message}
            })
        })
        .collect();
    serde_json::from_value(json!({ "Records": records })).unwrap()
}

/// A label result shaped like a DetectLabels response
pub fn image_labels(names: &[(&str, f64)]) -> LabelResult {
    let labels: Vec<_> = names
        .iter()
        .map(|(name, confidence)| {
            json!({
                "Name": name,
                "Confidence": confidence,
                "Instances": [],
                "Parents": [],
                "Aliases": [],
                "Categories": []
            })
        })
        .collect();
    json!({
        "Labels": labels,
        "LabelModelVersion": "3.0",
        "ResponseMetadata": {"RequestId": "req-1", "HTTPStatusCode": 200}
    })
    .as_object()
    .cloned()
    .unwrap()
}

/// One page of a GetLabelDetection response
pub fn video_page(names: &[&str]) -> LabelResult {
    let labels: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "Timestamp": (i as i64) * 1000,
                "Label": {"Name": name, "Confidence": 88.5, "Instances": [], "Parents": []}
            })
        })
        .collect();
    json!({
        "JobStatus": "SUCCEEDED",
        "VideoMetadata": {"Codec": "h264", "DurationMillis": 15000, "FrameRate": 29.97},
        "Labels": labels
    })
    .as_object()
    .cloned()
    .unwrap()
}
