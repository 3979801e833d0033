//! In-process per-company leases.
//!
//! Serializes dispatches for the same company inside one process so that a
//! burst of requests on a cold cache triggers a single resolver call and no
//! queue write overwrites another. Nothing here coordinates across processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

/// Registry of per-company async locks.
///
/// A slot lives in the registry only while someone holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct CompanyLeases {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl CompanyLeases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for the lease on `company`.
    ///
    /// Returns `None` when the wait times out; the caller then proceeds
    /// without the lease.
    pub async fn acquire(&self, company: &str, timeout: Duration) -> Option<CompanyLease> {
        let slot = self.slot(company);

        let acquired = tokio::time::timeout(timeout, slot.lock_owned()).await;
        match acquired {
            Ok(guard) => Some(CompanyLease {
                company: company.to_string(),
                guard: Some(guard),
                leases: self.clone(),
            }),
            Err(_) => {
                self.release(company);
                None
            }
        }
    }

    /// Number of companies with a holder or a waiter.
    pub fn active(&self) -> usize {
        self.lock_slots().len()
    }

    fn slot(&self, company: &str) -> Slot {
        self.lock_slots()
            .entry(company.to_string())
            .or_default()
            .clone()
    }

    /// Drops the registry slot when nobody else references it.
    fn release(&self, company: &str) {
        let mut slots = self.lock_slots();
        if slots
            .get(company)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(company);
        }
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A held company lease. Released on drop.
#[derive(Debug)]
pub struct CompanyLease {
    company: String,
    guard: Option<OwnedMutexGuard<()>>,
    leases: CompanyLeases,
}

impl Drop for CompanyLease {
    fn drop(&mut self) {
        // The guard owns a reference to the slot; drop it before checking the count.
        drop(self.guard.take());
        self.leases.release(&self.company);
    }
}
