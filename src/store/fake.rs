use crate::store::error::StoreError;
use crate::store::label_store::LabelStore;
use crate::store::models::LabelRecord;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory LabelStore keeping records in write order
#[derive(Clone, Default)]
pub struct FakeLabelStore {
    records: Arc<RwLock<Vec<LabelRecord>>>,
    fail: Arc<RwLock<bool>>,
}

impl FakeLabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail
    pub fn fake_fail_writes(&self) {
        *self.fail.write().unwrap() = true;
    }

    pub fn records(&self) -> Vec<LabelRecord> {
        self.records.read().unwrap().clone()
    }
}

#[async_trait]
impl LabelStore for FakeLabelStore {
    async fn put_record(&self, record: &LabelRecord) -> Result<(), StoreError> {
        if *self.fail.read().unwrap() {
            return Err(StoreError::Write {
                table: "fake".to_string(),
                id: record.id.to_string(),
                message: "Simulated write failure".to_string(),
            });
        }

        let mut records = self.records.write().unwrap();
        records.push(record.clone());
        Ok(())
    }
}
