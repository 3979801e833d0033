//! Shared AWS SDK configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::config::Config;

/// Loads SDK configuration for the configured region, honouring a custom
/// endpoint such as a local DynamoDB.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.aws_region.clone()));

    if let Some(endpoint) = &config.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
