use crate::vision::error::VisionError;
use crate::vision::service::{JobChannel, LabelPage, LabelResult, VisionService};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A call recorded by the fake vision service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionCall {
    DetectLabels { bucket: String, key: String },
    StartLabelDetection { bucket: String, key: String },
    GetLabelDetection { job_id: String, next_token: Option<String> },
}

/// In-memory VisionService for tests.
///
/// Image results are keyed by object key; job pages are keyed by
/// (job id, continuation token).
#[derive(Clone, Default)]
pub struct FakeVision {
    image_results: Arc<Mutex<HashMap<String, LabelResult>>>,
    job_pages: Arc<Mutex<HashMap<(String, Option<String>), LabelPage>>>,
    fail_keys: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<VisionCall>>>,
    next_job: Arc<Mutex<u32>>,
}

impl FakeVision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result returned by detect_labels for `key`; unknown keys get an empty label list
    pub fn fake_set_image_result(&self, key: &str, result: LabelResult) {
        let mut results = self.image_results.lock().unwrap();
        results.insert(key.to_string(), result);
    }

    /// Register the page served for `job_id` when asked with `token`
    pub fn fake_add_job_page(
        &self,
        job_id: &str,
        token: Option<&str>,
        result: LabelResult,
        next_token: Option<&str>,
    ) {
        let mut pages = self.job_pages.lock().unwrap();
        pages.insert(
            (job_id.to_string(), token.map(str::to_string)),
            LabelPage {
                result,
                next_token: next_token.map(str::to_string),
            },
        );
    }

    /// Every request touching `key` fails after this call
    pub fn fake_fail_key(&self, key: &str) {
        let mut fail_keys = self.fail_keys.lock().unwrap();
        fail_keys.insert(key.to_string());
    }

    pub fn calls(&self) -> Vec<VisionCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: VisionCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failure(&self, operation: &'static str, key: &str) -> Result<(), VisionError> {
        let fail_keys = self.fail_keys.lock().unwrap();
        if fail_keys.contains(key) {
            return Err(VisionError::request(
                operation,
                format!("Simulated failure for {}", key),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl VisionService for FakeVision {
    async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        _max_labels: i32,
    ) -> Result<LabelResult, VisionError> {
        self.record(VisionCall::DetectLabels {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.check_failure("DetectLabels", key)?;

        let results = self.image_results.lock().unwrap();
        Ok(results.get(key).cloned().unwrap_or_else(|| {
            let mut empty = LabelResult::new();
            empty.insert("Labels".to_string(), serde_json::Value::Array(vec![]));
            empty
        }))
    }

    async fn start_label_detection(
        &self,
        bucket: &str,
        key: &str,
        _channel: &JobChannel,
    ) -> Result<String, VisionError> {
        self.record(VisionCall::StartLabelDetection {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.check_failure("StartLabelDetection", key)?;

        let mut next_job = self.next_job.lock().unwrap();
        *next_job += 1;
        Ok(format!("fake-job-{}", *next_job))
    }

    async fn get_label_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<LabelPage, VisionError> {
        self.record(VisionCall::GetLabelDetection {
            job_id: job_id.to_string(),
            next_token: next_token.map(str::to_string),
        });
        self.check_failure("GetLabelDetection", job_id)?;

        let pages = self.job_pages.lock().unwrap();
        pages
            .get(&(job_id.to_string(), next_token.map(str::to_string)))
            .cloned()
            .ok_or_else(|| VisionError::UnknownJob(job_id.to_string()))
    }
}
