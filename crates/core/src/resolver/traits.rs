use async_trait::async_trait;

use super::{ResolveRequest, ResolverResponse, Result};

/// External computation that estimates the next available technician.
///
/// Running it populates the availability cache as a side effect. Callers must
/// not treat the returned payload as the source of truth and should re-read
/// the cache once the call returns.
#[async_trait]
pub trait AvailabilityResolver: Send + Sync {
    /// Invokes the resolver synchronously for a company.
    async fn invoke(&self, request: &ResolveRequest) -> Result<ResolverResponse>;
}
