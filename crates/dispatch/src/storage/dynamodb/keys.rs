//! Table and attribute names shared with the resolver and operator tooling.

pub const COMPANY_NAME: &str = "companyName";
pub const LOCKSMITH_ID: &str = "locksmithId";
pub const TRAVEL_TIME: &str = "travelTime";
pub const JOB_ADDRESS: &str = "jobAddress";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const JOB_QUEUE: &str = "jobQueue";
pub const JOB_ID: &str = "jobId";
pub const ADDRESS: &str = "address";
pub const ESTIMATED_TIME: &str = "estimatedTime";
pub const ARRIVED: &str = "arrived";

/// Name of a company's directory table.
pub fn jobs_table_name(company: &str, suffix: &str) -> String {
    format!("{company}{suffix}")
}
