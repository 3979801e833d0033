//! Shaping of dispatch outcomes into `{statusCode, body}` envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{dispatch_error_to_status_code, DispatchError, JobId};

/// Message carried by every successful response.
pub const SCHEDULED_MESSAGE: &str = "Locksmith appointment scheduled successfully";

/// Prefix of the body of every 500 response.
pub const SCHEDULING_FAILED_PREFIX: &str = "Error scheduling locksmith appointment: ";

/// What a successful dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub job_id: JobId,
    pub technician_id: String,
}

/// Lambda-style response envelope. `body` is always JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl DispatchResponse {
    pub fn scheduled(outcome: &ScheduleOutcome) -> Self {
        let body = json!({
            "message": SCHEDULED_MESSAGE,
            "jobId": outcome.job_id.as_str(),
            "locksmithId": outcome.technician_id,
        });

        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    /// Builds a failure envelope; the body is a JSON-encoded string.
    pub fn failure(error: &DispatchError) -> Self {
        let status_code = dispatch_error_to_status_code(error);
        let message = if status_code >= 500 {
            format!("{SCHEDULING_FAILED_PREFIX}{error}")
        } else {
            error.to_string()
        };

        Self {
            status_code,
            body: Value::String(message).to_string(),
        }
    }

    pub fn from_result(result: &Result<ScheduleOutcome, DispatchError>) -> Self {
        match result {
            Ok(outcome) => Self::scheduled(outcome),
            Err(error) => Self::failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> ScheduleOutcome {
        ScheduleOutcome {
            job_id: JobId::from_stored("JOB0A1B2C3"),
            technician_id: "T1".to_string(),
        }
    }

    #[test]
    fn test_scheduled_body() {
        let response = DispatchResponse::scheduled(&outcome());

        assert_eq!(response.status_code, 200);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["message"], SCHEDULED_MESSAGE);
        assert_eq!(body["jobId"], "JOB0A1B2C3");
        assert_eq!(body["locksmithId"], "T1");
    }

    #[test]
    fn test_not_found_body_is_json_string() {
        let error = DispatchError::TechnicianNotFound {
            technician_id: "GHOST".to_string(),
        };

        let response = DispatchResponse::failure(&error);

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, r#""Locksmith with ID GHOST not found""#);
    }

    #[test]
    fn test_missing_parameter_body() {
        let error = DispatchError::MissingParameter("Missing required parameter: company".into());

        let response = DispatchResponse::failure(&error);

        assert_eq!(response.status_code, 400);
        let body: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, "Missing required parameter: company");
    }

    #[test]
    fn test_server_error_body_has_prefix() {
        let error = DispatchError::StoreUnavailable("throttled".to_string());

        let response = DispatchResponse::failure(&error);

        assert_eq!(response.status_code, 500);
        let body: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(
            body,
            "Error scheduling locksmith appointment: Store unavailable: throttled"
        );
    }

    #[test]
    fn test_envelope_wire_shape() {
        let response = DispatchResponse::from_result(&Ok(outcome()));

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert!(value["body"].is_string());
        assert!(response.is_success());
    }
}
