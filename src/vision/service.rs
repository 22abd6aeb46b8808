use crate::vision::error::VisionError;
use async_trait::async_trait;
use std::sync::Arc;

/// A label result as returned by the vision service: a JSON object whose
/// `Labels` entry holds the detected labels.
pub type LabelResult = serde_json::Map<String, serde_json::Value>;

/// One page of an asynchronous labeling job's results
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPage {
    pub result: LabelResult,
    pub next_token: Option<String>,
}

/// Where the vision service reports completion of a labeling job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobChannel {
    pub topic_arn: String,
    pub role_arn: String,
}

/// VisionService defines the labeling operations used by the pipeline
#[async_trait]
pub trait VisionService: Send + Sync + 'static {
    /// Detect labels in an image stored at `bucket`/`key`
    async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<LabelResult, VisionError>;

    /// Start an asynchronous labeling job for a video and return its job id.
    ///
    /// Completion is announced on `channel`; the call does not wait for it.
    async fn start_label_detection(
        &self,
        bucket: &str,
        key: &str,
        channel: &JobChannel,
    ) -> Result<String, VisionError>;

    /// Fetch one page of a labeling job's results
    ///
    /// * `next_token` - continuation token returned by the previous page, `None` for the first
    async fn get_label_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<LabelPage, VisionError>;
}

#[async_trait]
impl<T: VisionService + ?Sized> VisionService for Arc<T> {
    async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<LabelResult, VisionError> {
        (**self).detect_labels(bucket, key, max_labels).await
    }

    async fn start_label_detection(
        &self,
        bucket: &str,
        key: &str,
        channel: &JobChannel,
    ) -> Result<String, VisionError> {
        (**self).start_label_detection(bucket, key, channel).await
    }

    async fn get_label_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<LabelPage, VisionError> {
        (**self).get_label_detection(job_id, next_token).await
    }
}
