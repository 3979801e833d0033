//! DynamoDB cache backend over the `NextAvailableCache` table.

mod cache;
mod conversions;
mod error;

pub use cache::DynamoDbCache;
