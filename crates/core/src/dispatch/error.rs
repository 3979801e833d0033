use thiserror::Error;

use crate::cache::CacheError;
use crate::resolver::ResolverError;
use crate::storage::RepositoryError;

/// Outcome categories of a failed dispatch.
///
/// Every lower-level failure is folded into one of these before it reaches a
/// caller, so callers only ever see a status code and a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The request did not carry a usable company.
    #[error("{0}")]
    MissingParameter(String),

    /// The cache was still empty after the resolver ran.
    #[error(
        "No available locksmith found for company: {company} even after calling the availability resolver"
    )]
    NoAvailabilityFound { company: String },

    /// The cached technician has no record in the company directory.
    #[error("Locksmith with ID {technician_id} not found")]
    TechnicianNotFound { technician_id: String },

    #[error("Availability resolver failed: {0}")]
    UpstreamResolverFailure(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Unexpected(String),
}

impl DispatchError {
    /// Short machine-readable name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "missing_parameter",
            Self::NoAvailabilityFound { .. } => "no_availability_found",
            Self::TechnicianNotFound { .. } => "technician_not_found",
            Self::UpstreamResolverFailure(_) => "upstream_resolver_failure",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<CacheError> for DispatchError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::ConnectionFailed(msg) | CacheError::OperationFailed(msg) => {
                Self::StoreUnavailable(msg)
            }
            CacheError::Serialization(msg) => Self::Unexpected(msg),
        }
    }
}

impl From<RepositoryError> for DispatchError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { id, .. } => Self::TechnicianNotFound { technician_id: id },
            RepositoryError::ConnectionFailed(msg) | RepositoryError::QueryFailed(msg) => {
                Self::StoreUnavailable(msg)
            }
            RepositoryError::Serialization(msg) | RepositoryError::InvalidData(msg) => {
                Self::Unexpected(msg)
            }
        }
    }
}

impl From<ResolverError> for DispatchError {
    fn from(err: ResolverError) -> Self {
        Self::UpstreamResolverFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_availability_display_names_company() {
        let error = DispatchError::NoAvailabilityFound {
            company: "AcmeLocks".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No available locksmith found for company: AcmeLocks even after calling the availability resolver"
        );
    }

    #[test]
    fn test_technician_not_found_display() {
        let error = DispatchError::TechnicianNotFound {
            technician_id: "T9".to_string(),
        };
        assert_eq!(error.to_string(), "Locksmith with ID T9 not found");
    }

    #[test]
    fn test_cache_errors_fold_into_dispatch_errors() {
        assert_eq!(
            DispatchError::from(CacheError::ConnectionFailed("down".to_string())),
            DispatchError::StoreUnavailable("down".to_string())
        );
        assert_eq!(
            DispatchError::from(CacheError::Serialization("bad".to_string())),
            DispatchError::Unexpected("bad".to_string())
        );
    }

    #[test]
    fn test_repository_not_found_becomes_technician_not_found() {
        let error = DispatchError::from(RepositoryError::NotFound {
            entity_type: "Technician",
            id: "T9".to_string(),
        });
        assert_eq!(
            error,
            DispatchError::TechnicianNotFound {
                technician_id: "T9".to_string()
            }
        );
    }

    #[test]
    fn test_repository_query_failure_becomes_store_unavailable() {
        let error = DispatchError::from(RepositoryError::QueryFailed("throttled".to_string()));
        assert_eq!(error.kind(), "store_unavailable");
    }

    #[test]
    fn test_resolver_errors_become_upstream_failures() {
        let error = DispatchError::from(ResolverError::Timeout(Duration::from_secs(25)));
        assert_eq!(
            error,
            DispatchError::UpstreamResolverFailure("Resolver timed out after 25s".to_string())
        );
    }
}
