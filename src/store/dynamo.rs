use crate::store::error::StoreError;
use crate::store::label_store::LabelStore;
use crate::store::models::LabelRecord;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// DynamoDB implementation of the LabelStore trait
#[derive(Clone)]
pub struct DynamoLabelStore {
    client: Client,
    table_name: String,
}

impl DynamoLabelStore {
    pub fn new(sdk_config: &SdkConfig, table_name: &str) -> Self {
        info!("Label records go to table {:?}", table_name);
        Self {
            client: Client::new(sdk_config),
            table_name: table_name.to_string(),
        }
    }
}

/// Map a JSON value onto a DynamoDB attribute value
pub fn to_attribute_value(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        // DynamoDB numbers travel as strings
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(items) => {
            AttributeValue::L(items.into_iter().map(to_attribute_value).collect())
        }
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| (k, to_attribute_value(v)))
                .collect(),
        ),
    }
}

#[async_trait]
impl LabelStore for DynamoLabelStore {
    async fn put_record(&self, record: &LabelRecord) -> Result<(), StoreError> {
        if self.table_name.is_empty() {
            return Err(StoreError::MissingTable);
        }

        // Record fields and label keys all become top-level attributes
        let item: HashMap<String, AttributeValue> = record
            .to_document()?
            .into_iter()
            .map(|(k, v)| (k, to_attribute_value(v)))
            .collect();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Write {
                table: self.table_name.clone(),
                id: record.id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!("Stored record {} in {}", record.id, self.table_name);
        Ok(())
    }
}
