//! Lambda API calls (Imperative Shell).

use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use aws_sdk_lambda::operation::get_function::GetFunctionError;
use aws_sdk_lambda::operation::update_function_configuration::UpdateFunctionConfigurationError;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{FunctionCode, Runtime};
use aws_sdk_lambda::Client;

use super::error::{LambdaError, Result};
use super::planning::FunctionState;
use crate::aws::AwsConfig;

const HANDLER: &str = "bootstrap";
const TIMEOUT_SECONDS: i32 = 30;
const MEMORY_MB: i32 = 128;
const DESCRIPTION: &str = "Schedules locksmith appointments";

pub async fn create_client(config: &AwsConfig) -> Client {
    Client::new(&config.load().await)
}

fn sdk_error<E, R>(err: SdkError<E, R>) -> LambdaError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    LambdaError::AwsSdk(DisplayErrorContext(&err).to_string())
}

/// Fetches the function's current state, returns None if it doesn't exist.
pub async fn get_function_state(client: &Client, function_name: &str) -> Result<Option<FunctionState>> {
    let response = match client.get_function().function_name(function_name).send().await {
        Ok(response) => response,
        Err(err) => {
            let message = DisplayErrorContext(&err).to_string();
            return match err.into_service_error() {
                GetFunctionError::ResourceNotFoundException(_) => Ok(None),
                _ => Err(LambdaError::AwsSdk(message)),
            };
        }
    };

    let configuration = response.configuration();
    Ok(Some(FunctionState {
        arn: configuration
            .and_then(|c| c.function_arn())
            .unwrap_or(function_name)
            .to_string(),
        role: configuration.and_then(|c| c.role()).map(str::to_string),
    }))
}

/// Creates the function and publishes its first version. Returns the ARN.
pub async fn create_function(
    client: &Client,
    function_name: &str,
    role_arn: &str,
    package: Vec<u8>,
) -> Result<String> {
    let response = client
        .create_function()
        .function_name(function_name)
        .runtime(Runtime::Providedal2023)
        .role(role_arn)
        .handler(HANDLER)
        .code(FunctionCode::builder().zip_file(Blob::new(package)).build())
        .description(DESCRIPTION)
        .timeout(TIMEOUT_SECONDS)
        .memory_size(MEMORY_MB)
        .publish(true)
        .send()
        .await
        .map_err(sdk_error)?;

    Ok(response.function_arn().unwrap_or(function_name).to_string())
}

/// Uploads new code and publishes a version. Returns the ARN.
pub async fn update_function_code(
    client: &Client,
    function_name: &str,
    package: Vec<u8>,
) -> Result<String> {
    let response = client
        .update_function_code()
        .function_name(function_name)
        .zip_file(Blob::new(package))
        .publish(true)
        .send()
        .await
        .map_err(sdk_error)?;

    Ok(response.function_arn().unwrap_or(function_name).to_string())
}

/// Switches the function's execution role. A function that is mid-update
/// fails with `LambdaError::Conflict`.
pub async fn update_role(client: &Client, function_name: &str, role_arn: &str) -> Result<()> {
    match client
        .update_function_configuration()
        .function_name(function_name)
        .role(role_arn)
        .send()
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            let message = DisplayErrorContext(&err).to_string();
            Err(match err.into_service_error() {
                UpdateFunctionConfigurationError::ResourceConflictException(_) => {
                    LambdaError::Conflict(message)
                }
                _ => LambdaError::AwsSdk(message),
            })
        }
    }
}
