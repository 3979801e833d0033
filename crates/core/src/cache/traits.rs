use async_trait::async_trait;

use crate::dispatch::CacheEntry;

use super::Result;

/// Store of "next available technician" facts, one per company.
///
/// Entries carry no expiry. They are written by the availability resolver and
/// removed by the dispatcher once a job has been booked against them.
#[async_trait]
pub trait AvailabilityCache: Send + Sync {
    /// Gets the cached availability for a company.
    async fn get(&self, company: &str) -> Result<Option<CacheEntry>>;

    /// Stores an availability entry, replacing any entry for the same company.
    async fn put(&self, entry: &CacheEntry) -> Result<()>;

    /// Deletes the entry for a company. Deleting an absent entry is not an error.
    async fn delete(&self, company: &str) -> Result<()>;
}
