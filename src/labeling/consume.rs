use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::labeling::error::LabelingError;
use crate::labeling::events::{CompletionMessage, SnsEvent};
use crate::labeling::normalize::build_record;
use crate::store::LabelStore;
use crate::vision::{LabelResult, VisionError, VisionService};

/// Outcome of one completion batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumeReport {
    /// Ids of the records written, in message order
    pub record_ids: Vec<Uuid>,
}

/// Collect every result page of a labeling job into one result.
///
/// The first page's fields are kept; the `Labels` of each following page are
/// appended in page order until the service stops returning a token.
pub async fn poll_job_labels<V: VisionService + ?Sized>(
    vision: &V,
    job_id: &str,
) -> Result<LabelResult, VisionError> {
    let first = vision.get_label_detection(job_id, None).await?;
    let mut result = first.result;
    let mut next_token = first.next_token;
    let mut pages = 1;

    // Keep asking for pages until the service stops handing out a token
    while let Some(token) = next_token {
        let page = vision.get_label_detection(job_id, Some(&token)).await?;
        append_labels(&mut result, page.result);
        next_token = page.next_token;
        pages += 1;
    }

    debug!("Collected {} result pages for job {}", pages, job_id);
    Ok(result)
}

fn append_labels(result: &mut LabelResult, mut page: LabelResult) {
    // Only the label list grows; everything else comes from the first page
    let Some(Value::Array(more)) = page.remove("Labels") else {
        return;
    };

    match result
        .entry("Labels")
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(labels) => labels.extend(more),
        other => *other = Value::Array(more),
    }
}

/// Persists label results announced on the notification topic
pub struct CompletionHandler<V: VisionService, S: LabelStore> {
    vision: Arc<V>,
    store: Arc<S>,
}

impl<V: VisionService, S: LabelStore> CompletionHandler<V, S> {
    pub fn new(vision: V, store: S) -> Self {
        Self {
            vision: Arc::new(vision),
            store: Arc::new(store),
        }
    }

    /// Write one record per message, in order.
    ///
    /// Messages carry no idempotency key, so a redelivered message produces
    /// another record with a new id.
    pub async fn handle(&self, event: &SnsEvent) -> Result<ConsumeReport, LabelingError> {
        let mut report = ConsumeReport::default();

        for record in &event.records {
            let id = self.handle_message(&record.sns.message).await?;
            report.record_ids.push(id);
        }

        info!(
            "Completion batch done: {} records stored",
            report.record_ids.len()
        );
        Ok(report)
    }

    async fn handle_message(&self, message: &str) -> Result<Uuid, LabelingError> {
        let (labels, key, bucket) = match CompletionMessage::parse(message)? {
            CompletionMessage::Labels(notification) => {
                (notification.labels, notification.key, notification.bucket)
            }
            CompletionMessage::Job(job) => {
                // A failed job still gets polled; the service reports what it has
                if let Some(status) = job.status.as_deref() {
                    if status != "SUCCEEDED" {
                        warn!("Labeling job {} finished with status {}", job.job_id, status);
                    }
                }
                let labels = poll_job_labels(self.vision.as_ref(), &job.job_id).await?;
                (labels, job.video.s3_object_name, job.video.s3_bucket)
            }
        };

        let record = build_record(labels, &key, &bucket);
        self.store.put_record(&record).await?;

        info!(
            "Stored {} record {} for s3://{}/{}",
            record.media_type, record.id, bucket, key
        );
        Ok(record.id)
    }
}
