mod error;
mod http_mapping;
mod operations;
mod requests;
mod response;
mod types;

pub use error::DispatchError;
pub use http_mapping::dispatch_error_to_status_code;
pub use operations::{book_job, Booking};
pub use requests::{EventShape, ScheduleRequest, MISSING_COMPANY, MISSING_GATEWAY_ARGS};
pub use response::{DispatchResponse, ScheduleOutcome, SCHEDULED_MESSAGE, SCHEDULING_FAILED_PREFIX};
pub use types::{
    CacheEntry, Job, JobId, QueuedJob, TechnicianRecord, DEFAULT_ESTIMATED_TIME_MINUTES,
    JOB_ID_PREFIX,
};
