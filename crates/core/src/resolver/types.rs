use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload sent to the availability resolver.
///
/// Serialized with the attribute names the resolver expects:
/// `{"address": ..., "company": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Address hint; serialized as `null` when absent.
    pub address: Option<String>,
    pub company: String,
}

impl ResolveRequest {
    pub fn new(company: impl Into<String>, address: Option<String>) -> Self {
        Self {
            address,
            company: company.into(),
        }
    }
}

/// Opaque response returned by the resolver.
///
/// Only used for observability.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverResponse {
    /// Decoded payload, or the raw text as a JSON string when it was not JSON.
    pub payload: Value,
    /// Function-level error marker reported by the platform, if any.
    pub function_error: Option<String>,
}

impl ResolverResponse {
    /// Builds a response from raw payload bytes without rejecting non-JSON content.
    pub fn from_bytes(bytes: &[u8], function_error: Option<String>) -> Self {
        let payload = serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()));
        Self {
            payload,
            function_error,
        }
    }
}
