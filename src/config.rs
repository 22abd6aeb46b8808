use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub aws: AwsConfig,
    pub labeling: LabelingConfig,
    pub harvest: HarvestConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Falls back to the SDK's region resolution when unset
    pub region: Option<String>,
    /// Endpoint override for S3-compatible or emulated services
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// How an image upload is handed to the persistence stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDispatch {
    /// Publish the label result to the topic for the completion consumer
    #[default]
    Notify,
    /// Write the record straight to the table
    Direct,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    pub table_name: String,
    pub topic_arn: String,
    pub role_arn: String,
    pub supported_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
    pub max_labels: i32,
    pub image_dispatch: ImageDispatch,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            topic_arn: String::new(),
            role_arn: String::new(),
            supported_extensions: ["jpeg", "jpg", "png", "mp4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            video_extensions: vec!["mp4".to_string()],
            max_labels: 10,
            image_dispatch: ImageDispatch::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Listing endpoint, `{page}` is replaced with the page index
    pub listing_url: String,
    /// Photo URL template with `{photo}`, `{car_id}` and `{index}` placeholders
    pub image_url: String,
    pub concurrency: usize,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://api2.myauto.ge/ka/products?TypeID=0&ForRent=&Mans=&CurrencyID=3&MileageType=1&Page={page}".to_string(),
            image_url: "https://static.my.ge/myauto/photos/{photo}/large/{car_id}_{index}.jpg"
                .to_string(),
            concurrency: 32,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub path: String,
    /// Maximum size of a single log file in MB
    pub size: u64,
    pub max_files: usize,
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_text = fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read configuration file {}", path))?;
    let config: Config = toml::from_str(&config_text)
        .with_context(|| format!("Failed to parse configuration file {}", path))?;
    Ok(config)
}

/// Load `path`, falling back to built-in defaults when it is the default
/// path and does not exist. An explicitly named file must exist.
///
/// The flag is true when the defaults were used.
pub fn load_or_default(path: &str, is_default: bool) -> Result<(Config, bool)> {
    if is_default && !Path::new(path).exists() {
        return Ok((Config::default(), true));
    }
    Ok((load_config(path)?, false))
}

impl Config {
    /// Apply the deployment environment on top of the file settings
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(region) = lookup("AWS_REGION") {
            self.aws.region = Some(region);
        }
        if let Some(table) = lookup("DYNAMO_DB_TABLE") {
            self.labeling.table_name = table;
        }
        if let Some(topic) = lookup("REKOGNITION_SNS_TOPIC_ARN") {
            self.labeling.topic_arn = topic;
        }
        if let Some(role) = lookup("REKOGNITION_ROLE_ARN") {
            self.labeling.role_arn = role;
        }
        if let Some(extensions) = lookup("SUPPORTED_EXTENSIONS") {
            self.labeling.supported_extensions = extensions
                .split(',')
                .map(|ext| ext.trim().to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
    }
}
