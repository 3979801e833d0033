//! DynamoDB availability cache.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use locksmith_core::cache::{AvailabilityCache, Result};
use locksmith_core::dispatch::CacheEntry;

use super::conversions::{cache_entry_to_item, item_to_cache_entry};
use super::error::map_cache_error;
use crate::storage::dynamodb::keys;

/// Cache table keyed by `companyName`.
///
/// Reads are strongly consistent so a read right after the resolver's write
/// observes it.
pub struct DynamoDbCache {
    client: Client,
    table_name: String,
}

impl DynamoDbCache {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl AvailabilityCache for DynamoDbCache {
    async fn get(&self, company: &str) -> Result<Option<CacheEntry>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(keys::COMPANY_NAME, AttributeValue::S(company.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| map_cache_error("GetItem", e))?;

        result
            .item
            .map(|item| item_to_cache_entry(&item, company))
            .transpose()
    }

    async fn put(&self, entry: &CacheEntry) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(cache_entry_to_item(entry)))
            .send()
            .await
            .map_err(|e| map_cache_error("PutItem", e))?;
        Ok(())
    }

    async fn delete(&self, company: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(keys::COMPANY_NAME, AttributeValue::S(company.to_string()))
            .send()
            .await
            .map_err(|e| map_cache_error("DeleteItem", e))?;

        tracing::debug!(company = %company, "Availability entry deleted");
        Ok(())
    }
}
