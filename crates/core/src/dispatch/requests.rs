//! Normalization of inbound dispatch events.

use std::borrow::Cow;

use serde_json::Value;

use super::DispatchError;

/// Message for a direct invocation without a usable `company`.
pub const MISSING_COMPANY: &str = "Missing required parameter: company";

/// Message for a gateway event whose body lacks `args.company`.
pub const MISSING_GATEWAY_ARGS: &str = "Missing required parameters in API Gateway event";

/// The two accepted shapes of an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// `{ "company": ..., "address": ... }`
    Direct,
    /// `{ "body": ..., "requestContext": { "http": ... } }` with
    /// `{ "args": { "company": ..., "address": ... } }` inside the body.
    Gateway,
}

impl EventShape {
    pub fn detect(event: &Value) -> Self {
        let has_body = event.get("body").is_some();
        let has_http_context = event
            .get("requestContext")
            .and_then(|ctx| ctx.get("http"))
            .is_some();

        if has_body && has_http_context {
            Self::Gateway
        } else {
            Self::Direct
        }
    }
}

/// A validated request to schedule a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub company: String,
    /// Hint forwarded to the resolver on a cache miss.
    pub address: Option<String>,
}

impl ScheduleRequest {
    pub fn new(company: impl Into<String>, address: Option<String>) -> Self {
        Self {
            company: company.into(),
            address,
        }
    }

    /// Normalizes either event shape into a request.
    ///
    /// A gateway body given as a string is parsed as JSON first; a string that
    /// is not JSON is reported as [`DispatchError::Unexpected`].
    pub fn from_event(event: &Value) -> Result<Self, DispatchError> {
        match EventShape::detect(event) {
            EventShape::Direct => Self::from_args(Some(event), MISSING_COMPANY),
            EventShape::Gateway => {
                let body = decode_gateway_body(event)?;
                Self::from_args(body.get("args"), MISSING_GATEWAY_ARGS)
            }
        }
    }

    fn from_args(args: Option<&Value>, missing_message: &str) -> Result<Self, DispatchError> {
        let company = args
            .and_then(|a| a.get("company"))
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DispatchError::MissingParameter(missing_message.to_string()))?;

        let address = args
            .and_then(|a| a.get("address"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self::new(company, address))
    }
}

fn decode_gateway_body(event: &Value) -> Result<Cow<'_, Value>, DispatchError> {
    match event.get("body") {
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map(Cow::Owned)
            .map_err(|e| DispatchError::Unexpected(format!("Invalid request body: {e}"))),
        Some(other) => Ok(Cow::Borrowed(other)),
        None => Ok(Cow::Owned(Value::Null)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway(body: Value) -> Value {
        json!({
            "body": body,
            "requestContext": { "http": { "method": "POST" } }
        })
    }

    #[test]
    fn test_direct_event() {
        let event = json!({ "company": "AcmeLocks", "address": "1 Main St" });

        let request = ScheduleRequest::from_event(&event).unwrap();

        assert_eq!(
            request,
            ScheduleRequest::new("AcmeLocks", Some("1 Main St".to_string()))
        );
    }

    #[test]
    fn test_direct_event_without_address() {
        let event = json!({ "company": "AcmeLocks" });

        let request = ScheduleRequest::from_event(&event).unwrap();

        assert!(request.address.is_none());
    }

    #[test]
    fn test_direct_event_missing_company() {
        let err = ScheduleRequest::from_event(&json!({ "address": "1 Main St" })).unwrap_err();
        assert_eq!(err, DispatchError::MissingParameter(MISSING_COMPANY.to_string()));
    }

    #[test]
    fn test_empty_or_non_string_company_is_missing() {
        for company in [json!(""), json!(null), json!(42), json!({"name": "x"})] {
            let err = ScheduleRequest::from_event(&json!({ "company": company })).unwrap_err();
            assert!(
                matches!(err, DispatchError::MissingParameter(_)),
                "company {company} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_non_string_address_is_ignored() {
        let event = json!({ "company": "AcmeLocks", "address": 12 });

        let request = ScheduleRequest::from_event(&event).unwrap();

        assert!(request.address.is_none());
    }

    #[test]
    fn test_gateway_event_with_string_body() {
        let body = json!({ "args": { "company": "AcmeLocks", "address": "1 Main St" } });
        let event = gateway(Value::String(body.to_string()));

        let request = ScheduleRequest::from_event(&event).unwrap();

        assert_eq!(request.company, "AcmeLocks");
        assert_eq!(request.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn test_gateway_event_with_object_body() {
        let event = gateway(json!({ "args": { "company": "AcmeLocks" } }));

        let request = ScheduleRequest::from_event(&event).unwrap();

        assert_eq!(request.company, "AcmeLocks");
    }

    #[test]
    fn test_gateway_event_missing_args() {
        let event = gateway(json!({ "company": "AcmeLocks" }));

        let err = ScheduleRequest::from_event(&event).unwrap_err();

        assert_eq!(
            err,
            DispatchError::MissingParameter(MISSING_GATEWAY_ARGS.to_string())
        );
    }

    #[test]
    fn test_gateway_event_with_invalid_json_body() {
        let event = gateway(Value::String("not json".to_string()));

        let err = ScheduleRequest::from_event(&event).unwrap_err();

        assert!(matches!(err, DispatchError::Unexpected(_)));
    }

    #[test]
    fn test_body_without_http_context_is_direct() {
        let event = json!({
            "body": "{}",
            "requestContext": {},
            "company": "AcmeLocks"
        });

        assert_eq!(EventShape::detect(&event), EventShape::Direct);
        assert_eq!(ScheduleRequest::from_event(&event).unwrap().company, "AcmeLocks");
    }

    #[test]
    fn test_non_object_event_is_missing_company() {
        let err = ScheduleRequest::from_event(&json!(["AcmeLocks"])).unwrap_err();
        assert_eq!(err, DispatchError::MissingParameter(MISSING_COMPANY.to_string()));
    }
}
