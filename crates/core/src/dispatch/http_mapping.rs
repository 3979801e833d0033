//! Pure mapping of dispatch outcomes to HTTP-style status codes.

use super::DispatchError;

/// Maps a [`DispatchError`] to the status code reported to the caller.
///
/// - `MissingParameter` -> 400
/// - `NoAvailabilityFound` -> 404
/// - `TechnicianNotFound` -> 404
/// - everything else -> 500
///
/// ```
/// use locksmith_core::dispatch::{dispatch_error_to_status_code, DispatchError};
///
/// let error = DispatchError::MissingParameter("Missing required parameter: company".into());
/// assert_eq!(dispatch_error_to_status_code(&error), 400);
/// ```
pub fn dispatch_error_to_status_code(error: &DispatchError) -> u16 {
    match error {
        DispatchError::MissingParameter(_) => 400,
        DispatchError::NoAvailabilityFound { .. } => 404,
        DispatchError::TechnicianNotFound { .. } => 404,
        DispatchError::UpstreamResolverFailure(_) => 500,
        DispatchError::StoreUnavailable(_) => 500,
        DispatchError::Unexpected(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_maps_to_400() {
        let error = DispatchError::MissingParameter("x".to_string());
        assert_eq!(dispatch_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_not_found_variants_map_to_404() {
        let no_availability = DispatchError::NoAvailabilityFound {
            company: "AcmeLocks".to_string(),
        };
        let no_technician = DispatchError::TechnicianNotFound {
            technician_id: "T1".to_string(),
        };
        assert_eq!(dispatch_error_to_status_code(&no_availability), 404);
        assert_eq!(dispatch_error_to_status_code(&no_technician), 404);
    }

    #[test]
    fn test_failures_map_to_500() {
        for error in [
            DispatchError::UpstreamResolverFailure("x".to_string()),
            DispatchError::StoreUnavailable("x".to_string()),
            DispatchError::Unexpected("x".to_string()),
        ] {
            assert_eq!(dispatch_error_to_status_code(&error), 500, "{error:?}");
        }
    }
}
