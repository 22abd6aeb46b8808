use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::harvest::error::HarvestError;

/// Bytes written per write call while streaming a body to disk
pub const CHUNK_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub failed: usize,
}

/// Last path segment of `url`, used as the local file name
pub fn file_name_for(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let name = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    Some(name.to_string())
}

/// Download one URL into `dir`, streaming the body in `CHUNK_SIZE` pieces.
///
/// Nothing is written unless the server answers with a success status.
pub async fn download_image(
    client: &Client,
    url: &str,
    dir: &Path,
) -> Result<PathBuf, HarvestError> {
    let name = file_name_for(url).ok_or_else(|| HarvestError::InvalidUrl(url.to_string()))?;

    let mut response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status,
        });
    }

    // Status is checked first so a 404 never leaves an empty file behind
    let path = dir.join(name);
    let mut file = File::create(&path).await?;
    while let Some(chunk) = response.chunk().await? {
        for piece in chunk.chunks(CHUNK_SIZE) {
            file.write_all(piece).await?;
        }
    }
    file.flush().await?;

    Ok(path)
}

/// Download every URL into `dir` with at most `concurrency` requests in flight.
/// A `concurrency` of 0 starts every download at once.
///
/// Individual failures are logged and counted. The call returns once every
/// download has finished one way or the other; it only fails when `dir`
/// cannot be created.
pub async fn download_all(
    client: &Client,
    urls: &[String],
    dir: &Path,
    concurrency: usize,
) -> Result<DownloadSummary, HarvestError> {
    tokio::fs::create_dir_all(dir).await?;

    let limit = match concurrency {
        0 => urls.len().max(1),
        n => n,
    };

    let outcomes: Vec<bool> = stream::iter(urls)
        .map(|url| async move {
            match download_image(client, url, dir).await {
                Ok(path) => {
                    info!("Downloaded: {}", path.display());
                    true
                }
                Err(e) => {
                    warn!("Error downloading image {}: {}", url, e);
                    false
                }
            }
        })
        .buffer_unordered(limit)
        .collect()
        .await;

    let downloaded = outcomes.iter().filter(|ok| **ok).count();
    Ok(DownloadSummary {
        downloaded,
        failed: outcomes.len() - downloaded,
    })
}
