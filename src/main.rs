// src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn};

mod aws;
mod config;
mod harvest;
mod labeling;
mod logging;
mod notify;
mod s3;
mod store;
#[cfg(test)]
mod test_utils;
mod vision;

use crate::harvest::{HarvestOptions, Harvester};
use crate::labeling::{CompletionHandler, IngestHandler, S3Event, SnsEvent};
use crate::notify::SnsNotifier;
use crate::s3::{S3Storage, Storage};
use crate::store::DynamoLabelStore;
use crate::vision::RekognitionVision;

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG,
        global = true
    )]
    config: String,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Label the media named in an S3 upload event
    Ingest {
        /// Event JSON file, read from stdin when omitted
        #[arg(long, value_name = "FILE")]
        event: Option<PathBuf>,
    },
    /// Persist labels delivered by an SNS notification event
    Consume {
        /// Event JSON file, read from stdin when omitted
        #[arg(long, value_name = "FILE")]
        event: Option<PathBuf>,
    },
    /// Download listing photos, optionally zipping and uploading them
    Harvest {
        /// Number of listing pages to walk
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Directory the photos are written to
        #[arg(long, default_value = "downloaded_images")]
        output_dir: PathBuf,

        /// Also write the directory into <output-dir>.zip
        #[arg(long)]
        zip: bool,

        /// Upload the downloaded photos to this bucket
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Key prefix for uploaded photos
        #[arg(long, default_value = "")]
        s3_prefix: String,

        /// Maximum downloads in flight
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, use_defaults) =
        match config::load_or_default(&cli.config, cli.config == DEFAULT_CONFIG) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Failed to load configuration: {:#}", e);
                process::exit(1);
            }
        };
    config.apply_env();

    let _log_guard = logging::init_logging(config.logging.as_ref(), cli.verbose)?;

    info!("Media Label Pipeline v{}", env!("CARGO_PKG_VERSION"));
    if use_defaults {
        warn!("{} not found, using default configuration", cli.config);
    } else {
        info!("Loaded configuration from: {}", cli.config);
    }

    let result = match cli.command {
        Commands::Ingest { event } => run_ingest(config, event.as_deref()).await,
        Commands::Consume { event } => run_consume(config, event.as_deref()).await,
        Commands::Harvest {
            pages,
            output_dir,
            zip,
            s3_bucket,
            s3_prefix,
            concurrency,
        } => {
            // The command line wins over the config file
            if let Some(concurrency) = concurrency {
                config.harvest.concurrency = concurrency;
            }
            let options = HarvestOptions {
                pages,
                output_dir,
                zip,
                s3_bucket,
                s3_prefix,
            };
            run_harvest(config, options).await
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }

    Ok(())
}

/// Read an event document from `path`, or from stdin when no path is given
fn read_event<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read event from stdin")?;
            text
        }
    };

    serde_json::from_str(&text).context("Failed to parse event JSON")
}

async fn run_ingest(config: config::Config, event: Option<&Path>) -> Result<()> {
    let event: S3Event = read_event(event)?;
    let sdk_config = aws::load_sdk_config(&config.aws).await;

    let handler = IngestHandler::new(
        RekognitionVision::new(&sdk_config),
        SnsNotifier::new(&sdk_config),
        DynamoLabelStore::new(&sdk_config, &config.labeling.table_name),
        config.labeling,
    );

    let report = handler.handle(&event).await?;
    info!(
        "Ingest finished: {} images labeled, {} video jobs started, {} skipped",
        report.images_labeled, report.videos_started, report.skipped
    );
    Ok(())
}

async fn run_consume(config: config::Config, event: Option<&Path>) -> Result<()> {
    let event: SnsEvent = read_event(event)?;
    let sdk_config = aws::load_sdk_config(&config.aws).await;

    let handler = CompletionHandler::new(
        RekognitionVision::new(&sdk_config),
        DynamoLabelStore::new(&sdk_config, &config.labeling.table_name),
    );

    let report = handler.handle(&event).await?;
    info!("Consume finished: {} records written", report.record_ids.len());
    Ok(())
}

async fn run_harvest(config: config::Config, options: HarvestOptions) -> Result<()> {
    // Only build an S3 client when the run uploads
    let storage: Option<Arc<dyn Storage>> = match &options.s3_bucket {
        Some(_) => {
            let sdk_config = aws::load_sdk_config(&config.aws).await;
            Some(Arc::new(S3Storage::new(
                &sdk_config,
                config.aws.endpoint.as_deref(),
            )))
        }
        None => None,
    };

    let harvester = Harvester::new(&config.harvest, storage)?;
    let report = harvester.run(&options).await?;

    info!(
        "Harvest finished: {} URLs, {} downloaded, {} failed",
        report.image_urls, report.download.downloaded, report.download.failed
    );
    Ok(())
}
