//! Seed command implementation.

use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use locksmith_core::dispatch::{CacheEntry, TechnicianRecord};

use super::config::{COMPANY_NAME, LOCKSMITH_ID};
use super::error::{DynamodbError, Result};

type Item = HashMap<String, AttributeValue>;

/// A directory item for a technician with an empty queue.
pub fn technician_item(record: &TechnicianRecord) -> Item {
    HashMap::from([
        (
            LOCKSMITH_ID.to_string(),
            AttributeValue::S(record.technician_id.clone()),
        ),
        ("jobQueue".to_string(), AttributeValue::L(Vec::new())),
    ])
}

/// A cache item in the shape the availability resolver writes.
pub fn cache_item(entry: &CacheEntry) -> Item {
    let mut item = HashMap::from([
        (
            COMPANY_NAME.to_string(),
            AttributeValue::S(entry.company.clone()),
        ),
        (
            LOCKSMITH_ID.to_string(),
            AttributeValue::S(entry.technician_id.clone()),
        ),
        (
            "travelTime".to_string(),
            AttributeValue::N(entry.travel_time_minutes.to_string()),
        ),
        (
            "jobAddress".to_string(),
            AttributeValue::S(entry.job_address.clone()),
        ),
    ]);
    if let Some(latitude) = entry.latitude {
        item.insert("latitude".to_string(), AttributeValue::N(latitude.to_string()));
    }
    if let Some(longitude) = entry.longitude {
        item.insert(
            "longitude".to_string(),
            AttributeValue::N(longitude.to_string()),
        );
    }
    item
}

/// Writes technician records, replacing any existing record and its queue.
pub async fn seed_technicians(
    client: &Client,
    table_name: &str,
    technicians: &[TechnicianRecord],
) -> Result<usize> {
    for technician in technicians {
        put(client, table_name, technician_item(technician)).await?;
    }
    Ok(technicians.len())
}

pub async fn seed_cache_entry(client: &Client, table_name: &str, entry: &CacheEntry) -> Result<()> {
    put(client, table_name, cache_item(entry)).await
}

async fn put(client: &Client, table_name: &str, item: Item) -> Result<()> {
    client
        .put_item()
        .table_name(table_name)
        .set_item(Some(item))
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(DisplayErrorContext(&e).to_string()))?;
    Ok(())
}
