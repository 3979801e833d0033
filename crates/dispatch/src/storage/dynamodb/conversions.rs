//! DynamoDB attribute conversion functions for technician records.
//!
//! Pure functions, testable without DynamoDB access.
//!
//! Queue entries read from a table are kept as `QueuedJob::Stored` holding
//! the attribute in DynamoDB JSON (`{"N": "12.5"}`, `{"M": {...}}`), so they
//! are written back exactly as read. Only newly booked jobs are encoded from
//! the typed `Job`.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use locksmith_core::dispatch::{Job, QueuedJob, TechnicianRecord};
use locksmith_core::storage::RepositoryError;
use serde_json::{json, Map, Value};

use super::attributes::{number, optional_number, optional_string, Item};
use super::keys;

/// Convert a job into the map stored inside `jobQueue`.
pub fn job_to_attribute(job: &Job) -> AttributeValue {
    let mut map = HashMap::new();
    map.insert(
        keys::JOB_ID.to_string(),
        AttributeValue::S(job.job_id.to_string()),
    );
    map.insert(
        keys::ADDRESS.to_string(),
        AttributeValue::S(job.address.clone()),
    );
    map.insert(keys::LATITUDE.to_string(), optional_number(job.latitude));
    map.insert(keys::LONGITUDE.to_string(), optional_number(job.longitude));
    map.insert(
        keys::ESTIMATED_TIME.to_string(),
        number(job.estimated_time_minutes),
    );
    map.insert(
        keys::TRAVEL_TIME.to_string(),
        number(job.travel_time_minutes),
    );
    map.insert(keys::ARRIVED.to_string(), AttributeValue::Bool(job.arrived));
    AttributeValue::M(map)
}

pub fn queued_job_to_attribute(entry: &QueuedJob) -> Result<AttributeValue, RepositoryError> {
    match entry {
        QueuedJob::Booked(job) => Ok(job_to_attribute(job)),
        QueuedJob::Stored(raw) => json_to_attribute(raw),
    }
}

/// Convert an ordered queue into the `jobQueue` list attribute.
pub fn job_queue_to_attribute(queue: &[QueuedJob]) -> Result<AttributeValue, RepositoryError> {
    queue
        .iter()
        .map(queued_job_to_attribute)
        .collect::<Result<_, _>>()
        .map(AttributeValue::L)
}

/// Convert a directory item into a technician record. An absent queue is empty.
pub fn item_to_technician(item: &Item) -> Result<TechnicianRecord, RepositoryError> {
    let technician_id = required_string(item, keys::LOCKSMITH_ID)?;

    let job_queue = match item.get(keys::JOB_QUEUE) {
        None | Some(AttributeValue::Null(_)) => Vec::new(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| attribute_to_json(value).map(QueuedJob::Stored))
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(RepositoryError::InvalidData(format!(
                "Invalid field type: {}",
                keys::JOB_QUEUE
            )))
        }
    };

    Ok(TechnicianRecord {
        technician_id,
        job_queue,
    })
}

/// Encodes an attribute as DynamoDB JSON.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, RepositoryError> {
    Ok(match value {
        AttributeValue::S(s) => json!({ "S": s }),
        AttributeValue::N(n) => json!({ "N": n }),
        AttributeValue::B(blob) => json!({ "B": blob.as_ref() }),
        AttributeValue::Bool(b) => json!({ "BOOL": b }),
        AttributeValue::Null(n) => json!({ "NULL": n }),
        AttributeValue::Ss(values) => json!({ "SS": values }),
        AttributeValue::Ns(values) => json!({ "NS": values }),
        AttributeValue::Bs(blobs) => {
            let blobs: Vec<&[u8]> = blobs.iter().map(|b| b.as_ref()).collect();
            json!({ "BS": blobs })
        }
        AttributeValue::L(values) => {
            let values = values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<Vec<_>, _>>()?;
            json!({ "L": values })
        }
        AttributeValue::M(map) => {
            let map = map
                .iter()
                .map(|(k, v)| attribute_to_json(v).map(|v| (k.clone(), v)))
                .collect::<Result<Map<_, _>, _>>()?;
            json!({ "M": map })
        }
        _ => {
            return Err(RepositoryError::InvalidData(format!(
                "Unsupported attribute in {}",
                keys::JOB_QUEUE
            )))
        }
    })
}

/// Decodes DynamoDB JSON produced by [`attribute_to_json`].
pub fn json_to_attribute(value: &Value) -> Result<AttributeValue, RepositoryError> {
    let invalid = || RepositoryError::InvalidData(format!("Invalid stored entry: {value}"));

    let (tag, inner) = value
        .as_object()
        .filter(|map| map.len() == 1)
        .and_then(|map| map.iter().next())
        .ok_or_else(invalid)?;

    let strings = |v: &Value| -> Option<Vec<String>> {
        v.as_array()?
            .iter()
            .map(|s| s.as_str().map(str::to_string))
            .collect()
    };
    let bytes = |v: &Value| -> Option<Blob> {
        v.as_array()?
            .iter()
            .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(Blob::new)
    };

    let attribute = match tag.as_str() {
        "S" => inner.as_str().map(|s| AttributeValue::S(s.to_string())),
        "N" => inner.as_str().map(|n| AttributeValue::N(n.to_string())),
        "B" => bytes(inner).map(AttributeValue::B),
        "BOOL" => inner.as_bool().map(AttributeValue::Bool),
        "NULL" => inner.as_bool().map(AttributeValue::Null),
        "SS" => strings(inner).map(AttributeValue::Ss),
        "NS" => strings(inner).map(AttributeValue::Ns),
        "BS" => inner
            .as_array()
            .and_then(|blobs| blobs.iter().map(bytes).collect::<Option<Vec<_>>>())
            .map(AttributeValue::Bs),
        "L" => {
            let values = inner.as_array().ok_or_else(invalid)?;
            Some(AttributeValue::L(
                values
                    .iter()
                    .map(json_to_attribute)
                    .collect::<Result<_, _>>()?,
            ))
        }
        "M" => {
            let map = inner.as_object().ok_or_else(invalid)?;
            Some(AttributeValue::M(
                map.iter()
                    .map(|(k, v)| json_to_attribute(v).map(|v| (k.clone(), v)))
                    .collect::<Result<_, _>>()?,
            ))
        }
        _ => None,
    };

    attribute.ok_or_else(invalid)
}

fn required_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    optional_string(item, key)
        .ok()
        .flatten()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))
}
