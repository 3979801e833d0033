//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::{KeyType, TableStatus as SdkTableStatus};
use aws_sdk_dynamodb::Client;

use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};
use crate::aws::AwsConfig;

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Client {
    Client::new(&config.load().await)
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err) => {
            let message = DisplayErrorContext(&err).to_string();
            return match err.into_service_error() {
                DescribeTableError::ResourceNotFoundException(_) => Ok(None),
                _ => Err(DynamodbError::AwsSdk(message)),
            };
        }
    };

    let Some(table) = response.table() else {
        return Ok(None);
    };

    let status = match table.table_status() {
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    let partition_key = table
        .key_schema()
        .iter()
        .find(|element| *element.key_type() == KeyType::Hash)
        .map(|element| element.attribute_name().to_string());

    Ok(Some(TableState {
        status,
        partition_key,
    }))
}
