//! Resolver invoked as an AWS Lambda function.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client;

use locksmith_core::resolver::{
    AvailabilityResolver, ResolveRequest, ResolverError, ResolverResponse, Result,
};

/// Synchronous `RequestResponse` invocation of the resolver function.
pub struct LambdaResolver {
    client: Client,
    function_name: String,
}

impl LambdaResolver {
    pub fn new(client: Client, function_name: impl Into<String>) -> Self {
        Self {
            client,
            function_name: function_name.into(),
        }
    }
}

#[async_trait]
impl AvailabilityResolver for LambdaResolver {
    async fn invoke(&self, request: &ResolveRequest) -> Result<ResolverResponse> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| ResolverError::InvocationFailed(e.to_string()))?;

        let output = self
            .client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(map_invoke_error)?;

        let body: &[u8] = output.payload().map(|b| b.as_ref()).unwrap_or_default();
        Ok(ResolverResponse::from_bytes(
            body,
            output.function_error().map(str::to_string),
        ))
    }
}

fn map_invoke_error<E, R>(err: SdkError<E, R>) -> ResolverError
where
    E: std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            ResolverError::Unreachable(DisplayErrorContext(&err).to_string())
        }
        _ => ResolverError::InvocationFailed(DisplayErrorContext(&err).to_string()),
    }
}
