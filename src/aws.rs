use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use tracing::info;

use crate::config::AwsConfig;

/// Load the SDK configuration shared by every AWS client.
///
/// Region, credentials and endpoint fall back to the standard AWS resolution
/// chain when they are not set in the configuration file.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let (Some(access_key), Some(secret_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        let credentials = Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "StaticCredentialsProvider",
        );
        loader = loader.credentials_provider(credentials);
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    info!("Loaded AWS configuration for region {:?}", sdk_config.region());
    sdk_config
}
