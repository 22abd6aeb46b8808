use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{ImageDispatch, LabelingConfig};
use crate::labeling::error::LabelingError;
use crate::labeling::events::{LabelNotification, S3Event, S3EventRecord};
use crate::labeling::normalize::build_record;
use crate::notify::Notifier;
use crate::store::LabelStore;
use crate::vision::{JobChannel, VisionService};

/// Media kinds the pipeline knows how to label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A supported upload, with its key already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    pub key: String,
    pub kind: MediaKind,
}

/// Outcome of one ingestion batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub images_labeled: usize,
    pub videos_started: usize,
    pub skipped: usize,
}

/// Classify a raw object key by its extension.
///
/// Returns `None` for keys whose extension is not in the supported list.
pub fn classify(key: &str, config: &LabelingConfig) -> Option<MediaKind> {
    let (_, extension) = key.rsplit_once('.')?;
    let matches = |list: &[String]| list.iter().any(|e| e.eq_ignore_ascii_case(extension));

    if !matches(config.supported_extensions.as_slice()) {
        return None;
    }
    if matches(config.video_extensions.as_slice()) {
        Some(MediaKind::Video)
    } else {
        Some(MediaKind::Image)
    }
}

/// Decode an S3 event key: `+` stands for a space, the rest is percent-encoded
pub fn decode_key(raw: &str) -> Result<String, LabelingError> {
    // S3 encodes spaces as '+', which percent-decoding alone leaves untouched
    urlencoding::decode(&raw.replace('+', " "))
        .map(|key| key.into_owned())
        .map_err(|e| LabelingError::InvalidEvent(format!("object key {}: {}", raw, e)))
}

fn upload_event(
    record: &S3EventRecord,
    config: &LabelingConfig,
) -> Result<Option<UploadEvent>, LabelingError> {
    let raw_key = &record.s3.object.key;
    let Some(kind) = classify(raw_key, config) else {
        return Ok(None);
    };

    Ok(Some(UploadEvent {
        bucket: record.s3.bucket.name.clone(),
        key: decode_key(raw_key)?,
        kind,
    }))
}

/// Reacts to storage uploads by requesting labels for supported media
pub struct IngestHandler<V: VisionService, N: Notifier, S: LabelStore> {
    vision: Arc<V>,
    notifier: Arc<N>,
    store: Arc<S>,
    config: LabelingConfig,
}

impl<V: VisionService, N: Notifier, S: LabelStore> IngestHandler<V, N, S> {
    pub fn new(vision: V, notifier: N, store: S, config: LabelingConfig) -> Self {
        Self {
            vision: Arc::new(vision),
            notifier: Arc::new(notifier),
            store: Arc::new(store),
            config,
        }
    }

    /// Process every record of the batch in order.
    ///
    /// The first failing record aborts the batch; records before it have
    /// already been dispatched.
    pub async fn handle(&self, event: &S3Event) -> Result<IngestReport, LabelingError> {
        let mut report = IngestReport::default();

        for record in &event.records {
            // Unsupported extensions are skipped without touching any service
            let Some(upload) = upload_event(record, &self.config)? else {
                debug!(
                    "Skipping unsupported object s3://{}/{}",
                    record.s3.bucket.name, record.s3.object.key
                );
                report.skipped += 1;
                continue;
            };

            match upload.kind {
                MediaKind::Image => {
                    self.label_image(&upload).await?;
                    report.images_labeled += 1;
                }
                MediaKind::Video => {
                    self.start_video_job(&upload).await?;
                    report.videos_started += 1;
                }
            }
        }

        info!(
            "Ingestion batch done: {} images labeled, {} video jobs started, {} skipped",
            report.images_labeled, report.videos_started, report.skipped
        );
        Ok(report)
    }

    async fn label_image(&self, upload: &UploadEvent) -> Result<(), LabelingError> {
        // Check the topic before paying for a labeling call
        if self.config.image_dispatch == ImageDispatch::Notify && self.config.topic_arn.is_empty()
        {
            return Err(LabelingError::MissingSetting("topic_arn"));
        }

        let labels = self
            .vision
            .detect_labels(&upload.bucket, &upload.key, self.config.max_labels)
            .await?;

        match self.config.image_dispatch {
            ImageDispatch::Notify => {
                let message = serde_json::to_string(&LabelNotification {
                    bucket: upload.bucket.clone(),
                    key: upload.key.clone(),
                    labels,
                })?;
                self.notifier
                    .publish(&self.config.topic_arn, &message)
                    .await?;
                info!(
                    "Published labels for s3://{}/{}",
                    upload.bucket, upload.key
                );
            }
            ImageDispatch::Direct => {
                let record = build_record(labels, &upload.key, &upload.bucket);
                self.store.put_record(&record).await?;
                info!(
                    "Stored record {} for s3://{}/{}",
                    record.id, upload.bucket, upload.key
                );
            }
        }

        Ok(())
    }

    async fn start_video_job(&self, upload: &UploadEvent) -> Result<(), LabelingError> {
        if self.config.topic_arn.is_empty() {
            return Err(LabelingError::MissingSetting("topic_arn"));
        }
        if self.config.role_arn.is_empty() {
            return Err(LabelingError::MissingSetting("role_arn"));
        }

        let channel = JobChannel {
            topic_arn: self.config.topic_arn.clone(),
            role_arn: self.config.role_arn.clone(),
        };
        let job_id = self
            .vision
            .start_label_detection(&upload.bucket, &upload.key, &channel)
            .await?;

        info!(
            "Started labeling job {} for s3://{}/{}",
            job_id, upload.bucket, upload.key
        );
        Ok(())
    }
}
