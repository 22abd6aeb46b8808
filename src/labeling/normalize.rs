use crate::store::{LabelRecord, MediaType};
use crate::vision::LabelResult;
use serde_json::Value;
use uuid::Uuid;

/// Keys the vision service adds that carry no label information
const SERVICE_KEYS: [&str; 2] = ["ResponseMetadata", "NextToken"];

/// Keys owned by the record itself; a label result never overrides them
const RECORD_KEYS: [&str; 4] = ["id", "mediaType", "mediaName", "mediaBucket"];

/// Replace every floating-point leaf with its decimal string form.
///
/// Objects keep their keys and arrays keep their order; integers, strings,
/// booleans and nulls pass through unchanged.
pub fn stringify_floats(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, stringify_floats(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(stringify_floats).collect()),
        Value::Number(n) if n.is_f64() => Value::String(n.to_string()),
        other => other,
    }
}

/// Turn a raw label result into a new record with a fresh id.
///
/// A `JobStatus` entry marks the result as coming from a video job.
pub fn build_record(mut labels: LabelResult, media_name: &str, media_bucket: &str) -> LabelRecord {
    for key in SERVICE_KEYS.iter().chain(RECORD_KEYS.iter()) {
        labels.remove(*key);
    }

    // Only video job results carry a status
    let media_type = match labels.remove("JobStatus") {
        Some(_) => MediaType::Video,
        None => MediaType::Image,
    };

    let labels = labels
        .into_iter()
        .map(|(key, value)| (key, stringify_floats(value)))
        .collect();

    LabelRecord {
        id: Uuid::new_v4(),
        media_type,
        media_name: media_name.to_string(),
        media_bucket: media_bucket.to_string(),
        labels,
    }
}
