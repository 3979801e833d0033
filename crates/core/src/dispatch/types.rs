use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Estimated on-site time for every new job, in minutes.
pub const DEFAULT_ESTIMATED_TIME_MINUTES: u32 = 30;

/// Prefix of every generated job identifier.
pub const JOB_ID_PREFIX: &str = "JOB";

const JOB_ID_HEX_LEN: usize = 7;

/// Identifier of a booked job: `JOB` followed by 7 uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Generates a fresh identifier from a random UUID.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{JOB_ID_PREFIX}{}",
            hex[..JOB_ID_HEX_LEN].to_ascii_uppercase()
        ))
    }

    /// Wraps an identifier read back from storage without validating it.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `raw` matches `JOB[0-9A-F]{7}`.
    pub fn is_well_formed(raw: &str) -> bool {
        raw.strip_prefix(JOB_ID_PREFIX).is_some_and(|hex| {
            hex.len() == JOB_ID_HEX_LEN
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        })
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cached "next available technician" fact for a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "companyName")]
    pub company: String,
    #[serde(rename = "locksmithId")]
    pub technician_id: String,
    #[serde(rename = "travelTime", default)]
    pub travel_time_minutes: u32,
    #[serde(rename = "jobAddress", default)]
    pub job_address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CacheEntry {
    /// Creates an entry with no travel time, address or coordinates.
    pub fn new(company: impl Into<String>, technician_id: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            technician_id: technician_id.into(),
            travel_time_minutes: 0,
            job_address: String::new(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_travel_time(mut self, minutes: u32) -> Self {
        self.travel_time_minutes = minutes;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.job_address = address.into();
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// An entry of a technician's job queue.
///
/// Entries read back from a directory stay in the directory's own encoding
/// and are written back exactly as read. Only jobs booked in this process are
/// typed.
#[derive(Debug, Clone, PartialEq)]
pub enum QueuedJob {
    Stored(Value),
    Booked(Job),
}

impl QueuedJob {
    pub fn as_booked(&self) -> Option<&Job> {
        match self {
            QueuedJob::Booked(job) => Some(job),
            QueuedJob::Stored(_) => None,
        }
    }
}

impl From<Job> for QueuedJob {
    fn from(job: Job) -> Self {
        QueuedJob::Booked(job)
    }
}

/// A technician and the ordered queue of jobs booked onto them.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicianRecord {
    pub technician_id: String,
    /// Oldest job first.
    pub job_queue: Vec<QueuedJob>,
}

impl TechnicianRecord {
    /// Creates a technician with an empty queue.
    pub fn new(technician_id: impl Into<String>) -> Self {
        Self {
            technician_id: technician_id.into(),
            job_queue: Vec::new(),
        }
    }

    pub fn with_job(mut self, job: impl Into<QueuedJob>) -> Self {
        self.job_queue.push(job.into());
        self
    }
}

/// A job booked onto a technician's queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: JobId,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "estimatedTime")]
    pub estimated_time_minutes: u32,
    #[serde(rename = "travelTime")]
    pub travel_time_minutes: u32,
    pub arrived: bool,
}

impl Job {
    /// Creates a new job from a cached availability fact.
    pub fn from_availability(entry: &CacheEntry) -> Self {
        Self {
            job_id: JobId::generate(),
            address: entry.job_address.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            estimated_time_minutes: DEFAULT_ESTIMATED_TIME_MINUTES,
            travel_time_minutes: entry.travel_time_minutes,
            arrived: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_job_id_is_well_formed() {
        for _ in 0..100 {
            let id = JobId::generate();
            assert!(JobId::is_well_formed(id.as_str()), "bad id: {id}");
        }
    }

    #[test]
    fn test_generated_job_ids_are_unique() {
        let ids: HashSet<JobId> = (0..1_000).map(|_| JobId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_is_well_formed_rejects_bad_ids() {
        assert!(JobId::is_well_formed("JOB0A1B2C3"));
        assert!(!JobId::is_well_formed("JOB0a1b2c3"));
        assert!(!JobId::is_well_formed("JOB0A1B2C"));
        assert!(!JobId::is_well_formed("JOB0A1B2C3D"));
        assert!(!JobId::is_well_formed("JOBZZZZZZZ"));
        assert!(!JobId::is_well_formed("ABC0A1B2C3"));
    }

    #[test]
    fn test_job_from_availability_copies_payload() {
        let entry = CacheEntry::new("AcmeLocks", "T1")
            .with_travel_time(12)
            .with_address("1 Main St")
            .with_coordinates(40.7, -74.0);

        let job = Job::from_availability(&entry);

        assert_eq!(job.address, "1 Main St");
        assert_eq!(job.latitude, Some(40.7));
        assert_eq!(job.longitude, Some(-74.0));
        assert_eq!(job.travel_time_minutes, 12);
        assert_eq!(job.estimated_time_minutes, DEFAULT_ESTIMATED_TIME_MINUTES);
        assert!(!job.arrived);
    }

    #[test]
    fn test_job_from_availability_without_coordinates() {
        let entry = CacheEntry::new("AcmeLocks", "T1");

        let job = Job::from_availability(&entry);

        assert!(job.latitude.is_none());
        assert!(job.longitude.is_none());
        assert_eq!(job.travel_time_minutes, 0);
        assert_eq!(job.address, "");
    }

    #[test]
    fn test_cache_entry_defaults_when_deserialized() {
        let entry: CacheEntry =
            serde_json::from_str(r#"{"companyName": "AcmeLocks", "locksmithId": "T1"}"#).unwrap();

        assert_eq!(entry, CacheEntry::new("AcmeLocks", "T1"));
    }

    #[test]
    fn test_job_uses_storage_attribute_names() {
        let job = Job {
            job_id: JobId::from_stored("JOB1234ABC"),
            address: "1 Main St".to_string(),
            latitude: None,
            longitude: None,
            estimated_time_minutes: 30,
            travel_time_minutes: 12,
            arrived: false,
        };

        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["jobId"], "JOB1234ABC");
        assert_eq!(value["estimatedTime"], 30);
        assert_eq!(value["travelTime"], 12);
        assert_eq!(value["arrived"], false);
        assert!(value["latitude"].is_null());
    }
}
