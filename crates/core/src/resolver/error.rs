use std::time::Duration;

use thiserror::Error;

/// Errors raised while invoking the availability resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Resolver unreachable: {0}")]
    Unreachable(String),
    #[error("Resolver invocation failed: {0}")]
    InvocationFailed(String),
    #[error("Resolver timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;
