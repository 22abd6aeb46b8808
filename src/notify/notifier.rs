use crate::notify::error::NotifyError;
use async_trait::async_trait;
use std::sync::Arc;

/// Notifier publishes messages to a pub/sub topic
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Publish `message` to `topic_arn` and return the message id
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, NotifyError>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, NotifyError> {
        (**self).publish(topic_arn, message).await
    }
}
