//! AWS target selection shared by the DynamoDB and Lambda commands.

use aws_config::{BehaviorVersion, Region, SdkConfig};

const DEFAULT_REGION: &str = "us-east-2";

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local emulators).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self, service: &str) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local {service} ({url})"),
            None => format!("AWS {service} (region: {})", self.region),
        }
    }

    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()));

        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display_local() {
        let config = AwsConfig {
            endpoint_url: Some("http://localhost:8000".to_string()),
            region: "us-east-2".to_string(),
        };
        assert_eq!(
            config.target_display("DynamoDB"),
            "Local DynamoDB (http://localhost:8000)"
        );
    }

    #[test]
    fn test_target_display_remote() {
        let config = AwsConfig {
            endpoint_url: None,
            region: "eu-west-1".to_string(),
        };
        assert_eq!(
            config.target_display("Lambda"),
            "AWS Lambda (region: eu-west-1)"
        );
    }
}
