pub mod error;
#[cfg(test)]
pub mod fake;
pub mod notifier;
pub mod sns;

pub use error::NotifyError;
#[cfg(test)]
pub use fake::FakeNotifier;
pub use notifier::Notifier;
pub use sns::SnsNotifier;
