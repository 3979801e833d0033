//! In-memory availability cache with LRU eviction.
//!
//! Entries never expire; they leave the cache when deleted or when evicted to
//! stay within `max_entries`.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use locksmith_core::cache::{AvailabilityCache, Result};
use locksmith_core::dispatch::CacheEntry;

/// Thread-safe LRU cache keyed by company.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` companies (at least one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl AvailabilityCache for MemoryCache {
    async fn get(&self, company: &str) -> Result<Option<CacheEntry>> {
        // LRU lookups update recency, so even reads take the write lock.
        let mut store = self.store.write().await;
        Ok(store.get(company).cloned())
    }

    async fn put(&self, entry: &CacheEntry) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(entry.company.clone(), entry.clone());
        Ok(())
    }

    async fn delete(&self, company: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(company);
        Ok(())
    }
}
