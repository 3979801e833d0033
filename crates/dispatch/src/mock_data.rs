//! Demo technicians and a stand-in resolver for the in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use locksmith_core::cache::AvailabilityCache;
use locksmith_core::dispatch::{CacheEntry, Job, JobId, TechnicianRecord};
use locksmith_core::resolver::{
    AvailabilityResolver, ResolveRequest, ResolverError, ResolverResponse, Result,
};

use crate::storage::InMemoryDirectory;

/// Seeds three demo companies. `KeyMasters` starts with a cached entry so the
/// first request for it is a cache hit.
pub async fn seed_demo_data(directory: &InMemoryDirectory, cache: &dyn AvailabilityCache) {
    for id in ["T1", "T2", "T3"] {
        directory
            .insert_technician("AcmeLocks", TechnicianRecord::new(id))
            .await;
    }

    let busy = TechnicianRecord::new("K1").with_job(Job {
        job_id: JobId::generate(),
        address: "500 Market St".to_string(),
        latitude: Some(37.7897),
        longitude: Some(-122.3972),
        estimated_time_minutes: 30,
        travel_time_minutes: 18,
        arrived: true,
    });
    directory.insert_technician("KeyMasters", busy).await;
    directory
        .insert_technician("KeyMasters", TechnicianRecord::new("K2"))
        .await;

    directory
        .insert_technician("SafeHaven", TechnicianRecord::new("S1"))
        .await;

    let warm = CacheEntry::new("KeyMasters", "K2")
        .with_travel_time(9)
        .with_address("1 Ferry Building")
        .with_coordinates(37.7955, -122.3937);
    if let Err(err) = cache.put(&warm).await {
        tracing::warn!(error = %err, "Failed to seed demo availability");
    }

    tracing::info!("Seeded demo technicians for AcmeLocks, KeyMasters and SafeHaven");
}

/// Minutes assumed per queued job when estimating travel time.
const MINUTES_PER_QUEUED_JOB: u32 = 5;
const BASE_TRAVEL_MINUTES: u32 = 10;

/// Writes an availability entry naming the technician with the shortest
/// queue. Companies without technicians get no entry.
pub struct DemoResolver {
    cache: Arc<dyn AvailabilityCache>,
    directory: InMemoryDirectory,
}

impl DemoResolver {
    pub fn new(cache: Arc<dyn AvailabilityCache>, directory: InMemoryDirectory) -> Self {
        Self { cache, directory }
    }
}

#[async_trait]
impl AvailabilityResolver for DemoResolver {
    async fn invoke(&self, request: &ResolveRequest) -> Result<ResolverResponse> {
        let technicians = self.directory.technicians(&request.company).await;

        let Some(pick) = technicians.iter().min_by_key(|t| t.job_queue.len()) else {
            return Ok(ResolverResponse {
                payload: json!({
                    "statusCode": 404,
                    "body": format!("No locksmiths registered for {}", request.company),
                }),
                function_error: None,
            });
        };

        let queued = u32::try_from(pick.job_queue.len()).unwrap_or(u32::MAX);
        let travel_time =
            BASE_TRAVEL_MINUTES.saturating_add(queued.saturating_mul(MINUTES_PER_QUEUED_JOB));
        let entry = CacheEntry::new(request.company.clone(), pick.technician_id.clone())
            .with_travel_time(travel_time)
            .with_address(request.address.clone().unwrap_or_default());

        self.cache
            .put(&entry)
            .await
            .map_err(|e| ResolverError::InvocationFailed(e.to_string()))?;

        Ok(ResolverResponse {
            payload: json!({
                "statusCode": 200,
                "locksmithId": entry.technician_id,
                "travelTime": travel_time,
            }),
            function_error: None,
        })
    }
}
