//! DynamoDB technician directory.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use locksmith_core::dispatch::{QueuedJob, TechnicianRecord};
use locksmith_core::storage::{Result, TechnicianDirectory};

use super::conversions::{item_to_technician, job_queue_to_attribute};
use super::error::{map_get_item_error, map_update_item_error};
use super::keys;

const ENTITY_TYPE: &str = "Technician";

/// Directory backed by one DynamoDB table per company.
pub struct DynamoDbDirectory {
    client: Client,
    table_suffix: String,
}

impl DynamoDbDirectory {
    pub fn new(client: Client, table_suffix: impl Into<String>) -> Self {
        Self {
            client,
            table_suffix: table_suffix.into(),
        }
    }

    fn table_name(&self, company: &str) -> String {
        keys::jobs_table_name(company, &self.table_suffix)
    }
}

#[async_trait]
impl TechnicianDirectory for DynamoDbDirectory {
    async fn get_technician(
        &self,
        company: &str,
        technician_id: &str,
    ) -> Result<Option<TechnicianRecord>> {
        let result = self
            .client
            .get_item()
            .table_name(self.table_name(company))
            .key(keys::LOCKSMITH_ID, AttributeValue::S(technician_id.to_string()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, ENTITY_TYPE, technician_id))?;

        match result.item {
            Some(item) => Ok(Some(item_to_technician(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_job_queue(
        &self,
        company: &str,
        technician_id: &str,
        queue: &[QueuedJob],
    ) -> Result<()> {
        let queue_attribute = job_queue_to_attribute(queue)?;

        self.client
            .update_item()
            .table_name(self.table_name(company))
            .key(keys::LOCKSMITH_ID, AttributeValue::S(technician_id.to_string()))
            .update_expression("SET jobQueue = :jobQueue")
            .condition_expression("attribute_exists(locksmithId)")
            .expression_attribute_values(":jobQueue", queue_attribute)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, ENTITY_TYPE, technician_id))?;

        tracing::debug!(
            company = %company,
            technician_id = %technician_id,
            queue_len = queue.len(),
            "Job queue written"
        );
        Ok(())
    }
}
