//! In-memory technician directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use locksmith_core::dispatch::{QueuedJob, TechnicianRecord};
use locksmith_core::storage::{RepositoryError, Result, TechnicianDirectory};

type CompanyDirectory = HashMap<String, TechnicianRecord>;

/// Directory keyed by company, then technician ID.
///
/// Data is not persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    companies: Arc<RwLock<HashMap<String, CompanyDirectory>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a technician record.
    pub async fn insert_technician(&self, company: &str, record: TechnicianRecord) {
        let mut companies = self.companies.write().await;
        companies
            .entry(company.to_string())
            .or_default()
            .insert(record.technician_id.clone(), record);
    }

    /// All technicians of a company, ordered by ID.
    pub async fn technicians(&self, company: &str) -> Vec<TechnicianRecord> {
        let companies = self.companies.read().await;
        let mut records: Vec<TechnicianRecord> = companies
            .get(company)
            .map(|d| d.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| a.technician_id.cmp(&b.technician_id));
        records
    }
}

#[async_trait]
impl TechnicianDirectory for InMemoryDirectory {
    async fn get_technician(
        &self,
        company: &str,
        technician_id: &str,
    ) -> Result<Option<TechnicianRecord>> {
        let companies = self.companies.read().await;
        Ok(companies
            .get(company)
            .and_then(|d| d.get(technician_id))
            .cloned())
    }

    async fn put_job_queue(
        &self,
        company: &str,
        technician_id: &str,
        queue: &[QueuedJob],
    ) -> Result<()> {
        let mut companies = self.companies.write().await;
        let record = companies
            .get_mut(company)
            .and_then(|d| d.get_mut(technician_id))
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "Technician",
                id: technician_id.to_string(),
            })?;
        record.job_queue = queue.to_vec();
        Ok(())
    }
}
