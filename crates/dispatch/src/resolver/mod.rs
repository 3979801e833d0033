//! Availability resolver backends and their selection.

mod http;
#[cfg(feature = "lambda")]
mod lambda;

use std::sync::Arc;

use locksmith_core::resolver::AvailabilityResolver;

use crate::config::Config;

pub use http::HttpResolver;
#[cfg(feature = "lambda")]
pub use lambda::LambdaResolver;

/// Resolver function used when the `lambda` feature is on and no other
/// resolver is configured.
pub const DEFAULT_FUNCTION_NAME: &str = "get-locksmith-eta";

/// Which resolver the service talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverChoice {
    Lambda { function_name: String },
    Http { url: String },
    Demo,
}

impl ResolverChoice {
    /// Picks a resolver in order: named Lambda function, HTTP URL, default
    /// Lambda function, demo resolver. `None` when nothing is usable.
    pub fn select(config: &Config, lambda_enabled: bool, demo_available: bool) -> Option<Self> {
        if lambda_enabled {
            if let Some(function_name) = &config.resolver_function_name {
                return Some(Self::Lambda {
                    function_name: function_name.clone(),
                });
            }
        }
        if let Some(url) = &config.resolver_url {
            return Some(Self::Http { url: url.clone() });
        }
        if lambda_enabled {
            return Some(Self::Lambda {
                function_name: DEFAULT_FUNCTION_NAME.to_string(),
            });
        }
        demo_available.then_some(Self::Demo)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lambda { .. } => "lambda",
            Self::Http { .. } => "http",
            Self::Demo => "demo",
        }
    }
}

/// Builds the resolver for `choice`. `demo` supplies the demo resolver when
/// the in-memory backend is compiled in.
#[cfg_attr(not(feature = "lambda"), allow(unused_variables))]
pub async fn build_resolver(
    choice: &ResolverChoice,
    config: &Config,
    demo: Option<Arc<dyn AvailabilityResolver>>,
) -> anyhow::Result<Arc<dyn AvailabilityResolver>> {
    let resolver: Arc<dyn AvailabilityResolver> = match choice {
        ResolverChoice::Http { url } => {
            tracing::info!(url = %url, "Using HTTP availability resolver");
            Arc::new(HttpResolver::new(url.clone()))
        }
        #[cfg(feature = "lambda")]
        ResolverChoice::Lambda { function_name } => {
            tracing::info!(function_name = %function_name, "Using Lambda availability resolver");
            let sdk_config = crate::aws::load_sdk_config(config).await;
            Arc::new(LambdaResolver::new(
                aws_sdk_lambda::Client::new(&sdk_config),
                function_name.clone(),
            ))
        }
        #[cfg(not(feature = "lambda"))]
        ResolverChoice::Lambda { .. } => {
            anyhow::bail!("the Lambda resolver requires the `lambda` feature")
        }
        ResolverChoice::Demo => {
            tracing::info!("Using demo availability resolver");
            demo.ok_or_else(|| anyhow::anyhow!("demo resolver is not available"))?
        }
    };

    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(function_name: Option<&str>, url: Option<&str>) -> Config {
        Config {
            resolver_function_name: function_name.map(str::to_string),
            resolver_url: url.map(str::to_string),
            ..Config::default()
        }
    }

    #[test]
    fn test_named_function_wins_when_lambda_enabled() {
        let choice = ResolverChoice::select(&config(Some("eta"), Some("http://x")), true, true);
        assert_eq!(
            choice,
            Some(ResolverChoice::Lambda {
                function_name: "eta".to_string()
            })
        );
    }

    #[test]
    fn test_url_used_without_lambda() {
        let choice = ResolverChoice::select(&config(Some("eta"), Some("http://x")), false, true);
        assert_eq!(
            choice,
            Some(ResolverChoice::Http {
                url: "http://x".to_string()
            })
        );
    }

    #[test]
    fn test_default_function_when_only_lambda() {
        let choice = ResolverChoice::select(&config(None, None), true, true);
        assert_eq!(
            choice,
            Some(ResolverChoice::Lambda {
                function_name: DEFAULT_FUNCTION_NAME.to_string()
            })
        );
    }

    #[test]
    fn test_demo_fallback_and_none() {
        assert_eq!(
            ResolverChoice::select(&config(None, None), false, true),
            Some(ResolverChoice::Demo)
        );
        assert_eq!(ResolverChoice::select(&config(None, None), false, false), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(ResolverChoice::Demo.name(), "demo");
        assert_eq!(
            ResolverChoice::Http {
                url: String::new()
            }
            .name(),
            "http"
        );
    }
}
