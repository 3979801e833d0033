//! The dispatch protocol.
//!
//! 1. Read the company's availability entry.
//! 2. On a miss, invoke the resolver and read the entry again. The resolver's
//!    own response is only logged.
//! 3. Look up the technician named by the entry.
//! 4. Append a new job to the technician's queue and write the queue back.
//! 5. Delete the availability entry.
//!
//! Every call runs against a deadline. Waiting for the lease and the resolver
//! are bounded by the time left; once the deadline passes no job is booked.
//! Steps 4 and 5 run on their own task, so a caller that goes away cannot
//! leave a booked job with a live availability entry.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use locksmith_core::cache::AvailabilityCache;
use locksmith_core::dispatch::{
    book_job, dispatch_error_to_status_code, Booking, CacheEntry, DispatchError,
    DispatchResponse, Job, QueuedJob, ScheduleOutcome, ScheduleRequest, MISSING_COMPANY,
};
use locksmith_core::resolver::{AvailabilityResolver, ResolveRequest, ResolverError};
use locksmith_core::storage::TechnicianDirectory;

use super::lease::{CompanyLease, CompanyLeases};
use crate::config::Config;

/// Tunables for a [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Upper bound on a single resolver call.
    pub resolver_timeout: Duration,
    /// Hold a per-company lease for the whole protocol.
    pub serialize_per_company: bool,
    /// Upper bound on waiting for the lease.
    pub lease_timeout: Duration,
    /// Time budget for a whole call, measured from its start.
    pub request_deadline: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            resolver_timeout: Duration::from_secs(25),
            serialize_per_company: true,
            lease_timeout: Duration::from_secs(30),
            request_deadline: Duration::from_secs(35),
        }
    }
}

impl DispatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            resolver_timeout: config.resolver_timeout(),
            serialize_per_company: config.serialize_dispatch,
            lease_timeout: config.lease_timeout(),
            request_deadline: config.request_timeout(),
        }
    }
}

/// Books jobs against cached availability.
#[derive(Clone)]
pub struct Dispatcher {
    cache: Arc<dyn AvailabilityCache>,
    resolver: Arc<dyn AvailabilityResolver>,
    directory: Arc<dyn TechnicianDirectory>,
    leases: CompanyLeases,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(
        cache: Arc<dyn AvailabilityCache>,
        resolver: Arc<dyn AvailabilityResolver>,
        directory: Arc<dyn TechnicianDirectory>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            cache,
            resolver,
            directory,
            leases: CompanyLeases::new(),
            settings,
        }
    }

    pub fn leases(&self) -> &CompanyLeases {
        &self.leases
    }

    /// Runs the protocol for a raw event and always produces an envelope.
    pub async fn handle(&self, event: &Value) -> DispatchResponse {
        let result = match ScheduleRequest::from_event(event) {
            Ok(request) => self.schedule(&request).await,
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            if dispatch_error_to_status_code(err) >= 500 {
                tracing::error!(kind = err.kind(), error = %err, "Dispatch failed");
            } else {
                tracing::info!(kind = err.kind(), error = %err, "Dispatch rejected");
            }
        }

        DispatchResponse::from_result(&result)
    }

    /// Books one job for `request.company`.
    pub async fn schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleOutcome, DispatchError> {
        let company = request.company.as_str();
        if company.is_empty() {
            return Err(DispatchError::MissingParameter(MISSING_COMPANY.to_string()));
        }

        let deadline = Instant::now() + self.settings.request_deadline;
        let lease = self.lease(company, deadline).await;

        let entry = self.current_availability(request, deadline).await?;
        let technician_id = entry.technician_id.clone();

        let record = self
            .directory
            .get_technician(company, &technician_id)
            .await?
            .ok_or_else(|| DispatchError::TechnicianNotFound {
                technician_id: technician_id.clone(),
            })?;

        if Instant::now() >= deadline {
            return Err(DispatchError::Unexpected(format!(
                "Dispatch deadline of {:?} exceeded before booking",
                self.settings.request_deadline
            )));
        }

        let Booking { job, queue } = book_job(&entry, record);
        let commit = Commit {
            cache: self.cache.clone(),
            directory: self.directory.clone(),
            company: company.to_string(),
            technician_id,
            job,
            queue,
            lease,
        };

        tokio::spawn(commit.run())
            .await
            .map_err(|e| DispatchError::Unexpected(format!("Booking task failed: {e}")))?
    }

    async fn lease(&self, company: &str, deadline: Instant) -> Option<CompanyLease> {
        if !self.settings.serialize_per_company {
            return None;
        }

        let timeout = remaining(deadline).min(self.settings.lease_timeout);
        let lease = self.leases.acquire(company, timeout).await;
        if lease.is_none() {
            tracing::warn!(
                company = %company,
                timeout = ?timeout,
                "Timed out waiting for company lease, proceeding unserialized"
            );
        }
        lease
    }

    async fn current_availability(
        &self,
        request: &ScheduleRequest,
        deadline: Instant,
    ) -> Result<CacheEntry, DispatchError> {
        let company = request.company.as_str();

        if let Some(entry) = self.cache.get(company).await? {
            tracing::trace!(company = %company, technician_id = %entry.technician_id, "Availability cache hit");
            return Ok(entry);
        }

        tracing::info!(company = %company, "Availability cache miss, invoking resolver");
        self.invoke_resolver(request, deadline).await?;

        self.cache
            .get(company)
            .await?
            .ok_or_else(|| DispatchError::NoAvailabilityFound {
                company: company.to_string(),
            })
    }

    async fn invoke_resolver(
        &self,
        request: &ScheduleRequest,
        deadline: Instant,
    ) -> Result<(), DispatchError> {
        let resolve = ResolveRequest::new(request.company.clone(), request.address.clone());
        let timeout = remaining(deadline).min(self.settings.resolver_timeout);

        let response = tokio::time::timeout(timeout, self.resolver.invoke(&resolve))
            .await
            .map_err(|_| ResolverError::Timeout(timeout))??;

        match &response.function_error {
            Some(marker) => tracing::warn!(
                company = %request.company,
                function_error = %marker,
                payload = %response.payload,
                "Resolver reported an error"
            ),
            None => tracing::debug!(
                company = %request.company,
                payload = %response.payload,
                "Resolver returned"
            ),
        }

        Ok(())
    }
}

fn remaining(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}

/// The queue write and the invalidation that must follow it.
struct Commit {
    cache: Arc<dyn AvailabilityCache>,
    directory: Arc<dyn TechnicianDirectory>,
    company: String,
    technician_id: String,
    job: Job,
    queue: Vec<QueuedJob>,
    /// Held until the entry is invalidated.
    lease: Option<CompanyLease>,
}

impl Commit {
    async fn run(self) -> Result<ScheduleOutcome, DispatchError> {
        let Commit {
            cache,
            directory,
            company,
            technician_id,
            job,
            queue,
            lease: _lease,
        } = self;

        directory
            .put_job_queue(&company, &technician_id, &queue)
            .await?;

        tracing::info!(
            company = %company,
            technician_id = %technician_id,
            job_id = %job.job_id,
            queue_len = queue.len(),
            "Job booked"
        );

        // The job exists at this point; a failed delete leaves a stale entry
        // that the next call books against again.
        if let Err(err) = cache.delete(&company).await {
            tracing::error!(
                company = %company,
                technician_id = %technician_id,
                job_id = %job.job_id,
                error = %err,
                "Failed to invalidate availability after booking"
            );
        }

        Ok(ScheduleOutcome {
            job_id: job.job_id,
            technician_id,
        })
    }
}
