//! Pure booking logic.

use super::{CacheEntry, Job, QueuedJob, TechnicianRecord};

/// The result of booking a job against a cached availability fact.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// The newly created job.
    pub job: Job,
    /// The technician's full queue with the new job appended, ready to be
    /// written back in one piece. Earlier entries are passed through as read.
    pub queue: Vec<QueuedJob>,
}

/// Creates a job from `entry` and appends it to the end of the technician's queue.
pub fn book_job(entry: &CacheEntry, record: TechnicianRecord) -> Booking {
    let job = Job::from_availability(entry);
    let mut queue = record.job_queue;
    queue.push(QueuedJob::Booked(job.clone()));
    Booking { job, queue }
}
