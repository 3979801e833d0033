//! Recording fakes for the collaborator traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use locksmith_core::cache::{self, AvailabilityCache, CacheError};
use locksmith_core::dispatch::{CacheEntry, Job, QueuedJob, TechnicianRecord};
use locksmith_core::resolver::{
    self, AvailabilityResolver, ResolveRequest, ResolverError, ResolverResponse,
};
use locksmith_core::storage::{self, RepositoryError, TechnicianDirectory};

#[derive(Debug, Default)]
pub struct FakeCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    pub gets: AtomicUsize,
    pub deletes: AtomicUsize,
    fail_gets: bool,
    fail_deletes: bool,
}

impl FakeCache {
    pub fn with_entry(entry: CacheEntry) -> Self {
        let cache = Self::default();
        cache
            .entries
            .try_write()
            .unwrap()
            .insert(entry.company.clone(), entry);
        cache
    }

    /// Every `get` fails with a connection error.
    pub fn failing_gets(mut self) -> Self {
        self.fail_gets = true;
        self
    }

    /// Every `delete` fails with a connection error and removes nothing.
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub async fn contains(&self, company: &str) -> bool {
        self.entries.read().await.contains_key(company)
    }
}

#[async_trait]
impl AvailabilityCache for FakeCache {
    async fn get(&self, company: &str) -> cache::Result<Option<CacheEntry>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets {
            return Err(CacheError::ConnectionFailed("connection refused".to_string()));
        }
        Ok(self.entries.read().await.get(company).cloned())
    }

    async fn put(&self, entry: &CacheEntry) -> cache::Result<()> {
        self.entries
            .write()
            .await
            .insert(entry.company.clone(), entry.clone());
        Ok(())
    }

    async fn delete(&self, company: &str) -> cache::Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes {
            return Err(CacheError::ConnectionFailed("connection reset".to_string()));
        }
        self.entries.write().await.remove(company);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeDirectory {
    records: RwLock<HashMap<(String, String), TechnicianRecord>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    fail_writes: bool,
    write_delay: Duration,
}

impl FakeDirectory {
    pub fn with_technician(company: &str, record: TechnicianRecord) -> Self {
        let directory = Self::default();
        directory
            .records
            .try_write()
            .unwrap()
            .insert((company.to_string(), record.technician_id.clone()), record);
        directory
    }

    /// Every `put_job_queue` fails with a connection error and writes nothing.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub async fn queue(&self, company: &str, technician_id: &str) -> Vec<QueuedJob> {
        self.records
            .read()
            .await
            .get(&(company.to_string(), technician_id.to_string()))
            .map(|r| r.job_queue.clone())
            .unwrap_or_default()
    }

    /// Jobs booked through the dispatcher, oldest first.
    pub async fn booked(&self, company: &str, technician_id: &str) -> Vec<Job> {
        self.queue(company, technician_id)
            .await
            .iter()
            .filter_map(QueuedJob::as_booked)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TechnicianDirectory for FakeDirectory {
    async fn get_technician(
        &self,
        company: &str,
        technician_id: &str,
    ) -> storage::Result<Option<TechnicianRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().await;
        Ok(records
            .get(&(company.to_string(), technician_id.to_string()))
            .cloned())
    }

    async fn put_job_queue(
        &self,
        company: &str,
        technician_id: &str,
        queue: &[QueuedJob],
    ) -> storage::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.write_delay).await;
        if self.fail_writes {
            return Err(RepositoryError::ConnectionFailed(
                "throughput exceeded".to_string(),
            ));
        }
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&(company.to_string(), technician_id.to_string()))
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "Technician",
                id: technician_id.to_string(),
            })?;
        record.job_queue = queue.to_vec();
        Ok(())
    }
}

/// Resolver fake that optionally writes an entry to the cache, like the real
/// resolver does as a side effect.
pub struct FakeResolver {
    cache: Option<Arc<FakeCache>>,
    entry: Option<CacheEntry>,
    delay: Duration,
    error: Option<ResolverError>,
    function_error: Option<String>,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeResolver {
    /// A resolver that returns without touching the cache.
    pub fn empty() -> Self {
        Self {
            cache: None,
            entry: None,
            delay: Duration::ZERO,
            error: None,
            function_error: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// A resolver that writes `entry` into `cache` on every call.
    pub fn populating(cache: Arc<FakeCache>, entry: CacheEntry) -> Self {
        Self {
            cache: Some(cache),
            entry: Some(entry),
            ..Self::empty()
        }
    }

    pub fn failing(error: ResolverError) -> Self {
        Self {
            error: Some(error),
            ..Self::empty()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_function_error(mut self, marker: &str) -> Self {
        self.function_error = Some(marker.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityResolver for FakeResolver {
    async fn invoke(&self, request: &ResolveRequest) -> resolver::Result<ResolverResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        if let (Some(cache), Some(entry)) = (&self.cache, &self.entry) {
            let mut entry = entry.clone();
            if let Some(address) = &request.address {
                entry.job_address = address.clone();
            }
            cache.put(&entry).await.unwrap();
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(ResolverResponse {
                payload: json!({ "statusCode": 200 }),
                function_error: self.function_error.clone(),
            }),
        }
    }
}
