//! DynamoDB error mapping for the availability cache.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use locksmith_core::cache::CacheError;

/// Map any SDK error from a cache operation to `CacheError`.
pub fn map_cache_error<E, R>(operation: &str, err: SdkError<E, R>) -> CacheError
where
    E: std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            CacheError::ConnectionFailed(DisplayErrorContext(&err).to_string())
        }
        _ => CacheError::OperationFailed(format!(
            "{operation} failed: {}",
            DisplayErrorContext(&err)
        )),
    }
}
