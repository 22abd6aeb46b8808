//! Event payloads delivered to the labeling handlers.

use crate::vision::LabelResult;
use serde::{Deserialize, Serialize};

/// A batch of storage-upload notifications
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3BucketRef,
    pub object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    /// URL-encoded object key, as delivered by S3
    pub key: String,
}

/// A batch of pub/sub notifications
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SnsEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEventRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsPayload {
    /// JSON document carried as a string
    #[serde(rename = "Message")]
    pub message: String,
}

/// Published by the ingestion trigger for images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelNotification {
    pub bucket: String,
    pub key: String,
    pub labels: LabelResult,
}

/// Published by the vision service when a video labeling job finishes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobCompletion {
    pub job_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "API")]
    pub api: Option<String>,
    pub video: JobVideo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobVideo {
    pub s3_object_name: String,
    pub s3_bucket: String,
}

/// Any message the completion consumer accepts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CompletionMessage {
    Labels(LabelNotification),
    Job(JobCompletion),
}

impl CompletionMessage {
    pub fn parse(message: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(message)
    }
}
