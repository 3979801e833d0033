//! Conversions between cache items and `CacheEntry`.

use aws_sdk_dynamodb::types::AttributeValue;
use locksmith_core::cache::CacheError;
use locksmith_core::dispatch::CacheEntry;

use crate::storage::dynamodb::attributes::{
    number, optional_f64, optional_minutes, optional_string, Item,
};
use crate::storage::dynamodb::keys;

pub fn cache_entry_to_item(entry: &CacheEntry) -> Item {
    let mut item = Item::new();
    item.insert(
        keys::COMPANY_NAME.to_string(),
        AttributeValue::S(entry.company.clone()),
    );
    item.insert(
        keys::LOCKSMITH_ID.to_string(),
        AttributeValue::S(entry.technician_id.clone()),
    );
    item.insert(
        keys::TRAVEL_TIME.to_string(),
        number(entry.travel_time_minutes),
    );
    item.insert(
        keys::JOB_ADDRESS.to_string(),
        AttributeValue::S(entry.job_address.clone()),
    );
    if let Some(latitude) = entry.latitude {
        item.insert(keys::LATITUDE.to_string(), number(latitude));
    }
    if let Some(longitude) = entry.longitude {
        item.insert(keys::LONGITUDE.to_string(), number(longitude));
    }
    item
}

/// Reads a cache item. `company` fills in for a missing key attribute.
pub fn item_to_cache_entry(item: &Item, company: &str) -> Result<CacheEntry, CacheError> {
    let technician_id = optional_string(item, keys::LOCKSMITH_ID)
        .map_err(CacheError::Serialization)?
        .ok_or_else(|| {
            CacheError::Serialization(format!("Missing field: {}", keys::LOCKSMITH_ID))
        })?;

    Ok(CacheEntry {
        company: optional_string(item, keys::COMPANY_NAME)
            .map_err(CacheError::Serialization)?
            .unwrap_or_else(|| company.to_string()),
        technician_id,
        travel_time_minutes: optional_minutes(item, keys::TRAVEL_TIME)
            .map_err(CacheError::Serialization)?
            .unwrap_or(0),
        job_address: optional_string(item, keys::JOB_ADDRESS)
            .map_err(CacheError::Serialization)?
            .unwrap_or_default(),
        latitude: optional_f64(item, keys::LATITUDE).map_err(CacheError::Serialization)?,
        longitude: optional_f64(item, keys::LONGITUDE).map_err(CacheError::Serialization)?,
    })
}
