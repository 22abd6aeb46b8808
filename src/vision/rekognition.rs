use crate::vision::error::VisionError;
use crate::vision::model::{
    widen, BoundingBox, ImageLabels, Instance, LabelEntry, NamedRef, TimedLabel, VideoLabels,
    VideoMetadata,
};
use crate::vision::service::{JobChannel, LabelPage, LabelResult, VisionService};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::types::{
    Image, Label, LabelDetection, NotificationChannel, S3Object, Video,
};
use aws_sdk_rekognition::Client;
use serde::Serialize;
use tracing::{debug, info};

/// Rekognition implementation of the VisionService trait
#[derive(Clone)]
pub struct RekognitionVision {
    client: Client,
}

impl RekognitionVision {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        info!(
            "Created Rekognition client for region {:?}",
            sdk_config.region()
        );
        Self {
            client: Client::new(sdk_config),
        }
    }
}

fn s3_object(bucket: &str, key: &str) -> S3Object {
    S3Object::builder().bucket(bucket).name(key).build()
}

fn to_result<T: Serialize>(value: &T) -> Result<LabelResult, VisionError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(VisionError::InvalidRequest(format!(
            "label response did not serialize to an object: {}",
            other
        ))),
    }
}

fn label_entry(label: &Label) -> LabelEntry {
    LabelEntry {
        name: label.name().map(str::to_string),
        confidence: label.confidence().map(widen),
        instances: label
            .instances()
            .iter()
            .map(|instance| Instance {
                bounding_box: instance.bounding_box().map(|b| BoundingBox {
                    width: b.width().map(widen),
                    height: b.height().map(widen),
                    left: b.left().map(widen),
                    top: b.top().map(widen),
                }),
                confidence: instance.confidence().map(widen),
            })
            .collect(),
        parents: label
            .parents()
            .iter()
            .map(|p| NamedRef {
                name: p.name().map(str::to_string),
            })
            .collect(),
        aliases: label
            .aliases()
            .iter()
            .map(|a| NamedRef {
                name: a.name().map(str::to_string),
            })
            .collect(),
        categories: label
            .categories()
            .iter()
            .map(|c| NamedRef {
                name: c.name().map(str::to_string),
            })
            .collect(),
    }
}

fn timed_label(detection: &LabelDetection) -> TimedLabel {
    TimedLabel {
        timestamp: detection.timestamp(),
        label: detection.label().map(label_entry),
        start_timestamp_millis: detection.start_timestamp_millis(),
        end_timestamp_millis: detection.end_timestamp_millis(),
        duration_millis: detection.duration_millis(),
    }
}

#[async_trait]
impl VisionService for RekognitionVision {
    async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<LabelResult, VisionError> {
        debug!("Detecting labels for s3://{}/{}", bucket, key);

        let output = self
            .client
            .detect_labels()
            .image(Image::builder().s3_object(s3_object(bucket, key)).build())
            .max_labels(max_labels)
            .send()
            .await
            .map_err(|e| VisionError::request("DetectLabels", DisplayErrorContext(&e)))?;

        let labels = ImageLabels {
            labels: output.labels().iter().map(label_entry).collect(),
            orientation_correction: output
                .orientation_correction()
                .map(|o| o.as_str().to_string()),
            label_model_version: output.label_model_version().map(str::to_string),
        };

        debug!(
            "Detected {} labels for s3://{}/{}",
            labels.labels.len(),
            bucket,
            key
        );
        to_result(&labels)
    }

    async fn start_label_detection(
        &self,
        bucket: &str,
        key: &str,
        channel: &JobChannel,
    ) -> Result<String, VisionError> {
        let notification_channel = NotificationChannel::builder()
            .sns_topic_arn(&channel.topic_arn)
            .role_arn(&channel.role_arn)
            .build()
            .map_err(|e| VisionError::InvalidRequest(e.to_string()))?;

        let output = self
            .client
            .start_label_detection()
            .video(Video::builder().s3_object(s3_object(bucket, key)).build())
            .notification_channel(notification_channel)
            .send()
            .await
            .map_err(|e| VisionError::request("StartLabelDetection", DisplayErrorContext(&e)))?;

        output.job_id().map(str::to_string).ok_or_else(|| {
            VisionError::request("StartLabelDetection", "response did not include a job id")
        })
    }

    async fn get_label_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<LabelPage, VisionError> {
        let output = self
            .client
            .get_label_detection()
            .job_id(job_id)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| VisionError::request("GetLabelDetection", DisplayErrorContext(&e)))?;

        // Build the same document shape the service returns as JSON
        let labels = VideoLabels {
            job_status: output
                .job_status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            status_message: output.status_message().map(str::to_string),
            video_metadata: output.video_metadata().map(|m| VideoMetadata {
                codec: m.codec().map(str::to_string),
                duration_millis: m.duration_millis(),
                format: m.format().map(str::to_string),
                frame_rate: m.frame_rate().map(widen),
                frame_height: m.frame_height(),
                frame_width: m.frame_width(),
            }),
            labels: output.labels().iter().map(timed_label).collect(),
            label_model_version: output.label_model_version().map(str::to_string),
        };

        Ok(LabelPage {
            result: to_result(&labels)?,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
