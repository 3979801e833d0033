use async_trait::async_trait;

use crate::dispatch::{QueuedJob, TechnicianRecord};

use super::Result;

/// Per-company directory of technicians and their job queues.
#[async_trait]
pub trait TechnicianDirectory: Send + Sync {
    /// Gets a technician record from a company's directory.
    async fn get_technician(
        &self,
        company: &str,
        technician_id: &str,
    ) -> Result<Option<TechnicianRecord>>;

    /// Overwrites a technician's job queue with the given ordered sequence.
    ///
    /// `Stored` entries must come from this directory and are written back
    /// unchanged. Fails with `NotFound` when the technician does not exist;
    /// the queue is never written for an unknown record.
    async fn put_job_queue(
        &self,
        company: &str,
        technician_id: &str,
        queue: &[QueuedJob],
    ) -> Result<()>;
}
