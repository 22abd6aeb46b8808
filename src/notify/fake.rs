use crate::notify::error::NotifyError;
use crate::notify::notifier::Notifier;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A message captured by FakeNotifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic_arn: String,
    pub message: String,
}

/// In-memory Notifier that keeps every published message
#[derive(Clone, Default)]
pub struct FakeNotifier {
    published: Arc<Mutex<Vec<PublishedMessage>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish fail
    pub fn fake_fail_publish(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, NotifyError> {
        if *self.fail.lock().unwrap() {
            return Err(NotifyError::Publish {
                topic: topic_arn.to_string(),
                message: "Simulated publish failure".to_string(),
            });
        }

        let mut published = self.published.lock().unwrap();
        published.push(PublishedMessage {
            topic_arn: topic_arn.to_string(),
            message: message.to_string(),
        });
        Ok(format!("fake-message-{}", published.len()))
    }
}
