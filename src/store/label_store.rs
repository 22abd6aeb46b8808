use crate::store::error::StoreError;
use crate::store::models::LabelRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// LabelStore persists label records to the document table
#[async_trait]
pub trait LabelStore: Send + Sync + 'static {
    /// Write a new record. Records are never updated, so each call creates one.
    async fn put_record(&self, record: &LabelRecord) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: LabelStore + ?Sized> LabelStore for Arc<T> {
    async fn put_record(&self, record: &LabelRecord) -> Result<(), StoreError> {
        (**self).put_record(record).await
    }
}
