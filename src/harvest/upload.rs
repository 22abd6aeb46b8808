use std::path::Path;
use tracing::{info, warn};

use crate::harvest::archive::list_files;
use crate::harvest::error::HarvestError;
use crate::s3::Storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub failed: usize,
}

/// Destination key: prefix, then the path relative to the uploaded directory
pub fn object_key(prefix: &str, relative: &Path) -> String {
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        relative
    } else {
        format!("{}/{}", prefix, relative)
    }
}

/// Upload every file under `dir` to `bucket`, one object per file.
///
/// A failed upload is logged and counted; the remaining files are still
/// uploaded.
pub async fn upload_directory<S: Storage + ?Sized>(
    storage: &S,
    dir: &Path,
    bucket: &str,
    prefix: &str,
) -> Result<UploadSummary, HarvestError> {
    let mut summary = UploadSummary::default();

    for path in list_files(dir)? {
        // Keys mirror the layout under `dir`
        let relative = path.strip_prefix(dir).unwrap_or(&path);
        let key = object_key(prefix, relative);

        match storage.put_file(bucket, &key, &path).await {
            Ok(()) => {
                info!("Uploaded {} to s3://{}/{}", path.display(), bucket, key);
                summary.uploaded += 1;
            }
            Err(e) => {
                warn!("Error uploading {}: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
