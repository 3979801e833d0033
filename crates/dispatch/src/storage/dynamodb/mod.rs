//! DynamoDB directory backend.
//!
//! Each company owns a table named `<company><suffix>` keyed by `locksmithId`.
//! A technician's whole job queue lives in the `jobQueue` list attribute.

pub(crate) mod attributes;
mod conversions;
mod error;
pub(crate) mod keys;
mod repository;

pub use repository::DynamoDbDirectory;
