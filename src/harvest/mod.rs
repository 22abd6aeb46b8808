pub mod archive;
pub mod download;
pub mod error;
pub mod listing;
pub mod upload;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub use archive::ArchiveSummary;
pub use download::DownloadSummary;
pub use error::HarvestError;
pub use listing::ListingClient;
pub use upload::UploadSummary;

use crate::config::HarvestConfig;
use crate::s3::Storage;

/// Options for one harvest run, usually taken from the command line
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub pages: u32,
    pub output_dir: PathBuf,
    pub zip: bool,
    pub s3_bucket: Option<String>,
    pub s3_prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestReport {
    pub image_urls: usize,
    pub download: DownloadSummary,
    pub files_on_disk: usize,
    pub archive: Option<ArchiveSummary>,
    pub upload: Option<UploadSummary>,
}

fn header(value: &str, name: &'static str) -> Result<HeaderValue, HarvestError> {
    HeaderValue::from_str(value).map_err(|_| HarvestError::InvalidHeader(name))
}

/// One HTTP client, shared by listing requests and photo downloads
pub fn http_client(config: &HarvestConfig) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header(&config.user_agent, "User-Agent")?);
    headers.insert(ACCEPT, header(&config.accept, "Accept")?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header(&config.accept_language, "Accept-Language")?,
    );

    Ok(Client::builder().default_headers(headers).build()?)
}

/// Runs the enumerate, download, archive and upload steps in order
pub struct Harvester {
    client: Client,
    listing: ListingClient,
    concurrency: usize,
    storage: Option<Arc<dyn Storage>>,
}

impl Harvester {
    /// `storage` is only needed when a run uploads to a bucket
    pub fn new(
        config: &HarvestConfig,
        storage: Option<Arc<dyn Storage>>,
    ) -> Result<Self, HarvestError> {
        let client = http_client(config)?;
        Ok(Self {
            listing: ListingClient::new(client.clone(), &config.listing_url, &config.image_url),
            client,
            concurrency: config.concurrency,
            storage,
        })
    }

    pub async fn run(&self, options: &HarvestOptions) -> Result<HarvestReport, HarvestError> {
        let mut report = HarvestReport::default();

        // Enumerate every photo URL before downloading anything
        let urls = self.listing.collect_image_urls(options.pages).await?;
        report.image_urls = urls.len();

        report.download = download::download_all(
            &self.client,
            &urls,
            &options.output_dir,
            self.concurrency,
        )
        .await?;
        info!(
            "Downloads finished: {} succeeded, {} failed",
            report.download.downloaded, report.download.failed
        );

        if options.zip {
            let summary = archive::archive_directory(&options.output_dir).await?;
            info!(
                "All images zipped into {} ({} files)",
                summary.path.display(),
                summary.files
            );
            info!("ZIP file size: {:.2} MB", summary.size_mb());
            report.archive = Some(summary);
        }

        // Count what is actually on disk, including files from earlier runs
        report.files_on_disk = archive::list_files(&options.output_dir)?.len();
        info!(
            "Total number of downloaded images: {}",
            report.files_on_disk
        );

        if let Some(bucket) = &options.s3_bucket {
            // Upload to S3 if a bucket was requested
            let Some(storage) = &self.storage else {
                return Err(HarvestError::MissingStorage(bucket.clone()));
            };
            info!("Uploading images to S3 bucket: {}", bucket);
            let summary = upload::upload_directory(
                storage.as_ref(),
                &options.output_dir,
                bucket,
                &options.s3_prefix,
            )
            .await?;
            info!(
                "Upload finished: {} uploaded, {} failed",
                summary.uploaded, summary.failed
            );
            report.upload = Some(summary);
        }

        Ok(report)
    }
}
