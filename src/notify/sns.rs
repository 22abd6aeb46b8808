use crate::notify::error::NotifyError;
use crate::notify::notifier::Notifier;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use tracing::debug;

/// SNS implementation of the Notifier trait
#[derive(Clone)]
pub struct SnsNotifier {
    client: Client,
}

impl SnsNotifier {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, NotifyError> {
        if topic_arn.is_empty() {
            return Err(NotifyError::MissingTopic);
        }

        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| NotifyError::Publish {
                topic: topic_arn.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let message_id = output.message_id().unwrap_or_default().to_string();
        debug!("Published message {} to {}", message_id, topic_arn);
        Ok(message_id)
    }
}
