//! Application state shared by all request handlers.
//!
//! Collaborators are built once at startup and shared behind trait objects;
//! the backend combination is chosen via feature flags.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use locksmith_core::cache::AvailabilityCache;
use locksmith_core::resolver::AvailabilityResolver;
use locksmith_core::storage::TechnicianDirectory;

use crate::config::Config;
use crate::dispatch::{DispatchSettings, Dispatcher};
use crate::resolver::{build_resolver, ResolverChoice};

// ============================================================================
// Compile-time feature validation
// ============================================================================

#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Cannot enable both 'dynamodb' and 'inmemory' backend features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one backend feature: 'inmemory' or 'dynamodb'");

/// Names of the backends in use, reported by `/healthz`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BackendInfo {
    pub storage: &'static str,
    pub cache: &'static str,
    pub resolver: &'static str,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub backends: BackendInfo,
    pub request_timeout: Duration,
}

impl AppState {
    fn build(
        cache: Arc<dyn AvailabilityCache>,
        resolver: Arc<dyn AvailabilityResolver>,
        directory: Arc<dyn TechnicianDirectory>,
        backends: BackendInfo,
        config: &Config,
    ) -> Self {
        tracing::info!(
            storage = backends.storage,
            cache = backends.cache,
            resolver = backends.resolver,
            serialize_dispatch = config.serialize_dispatch,
            "Dispatch backends ready"
        );

        Self {
            dispatcher: Dispatcher::new(
                cache,
                resolver,
                directory,
                DispatchSettings::from_config(config),
            ),
            backends,
            request_timeout: config.request_timeout(),
        }
    }
}

fn select_resolver(config: &Config) -> anyhow::Result<ResolverChoice> {
    ResolverChoice::select(config, cfg!(feature = "lambda"), cfg!(feature = "inmemory"))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no availability resolver configured: set RESOLVER_URL or enable the `lambda` feature"
            )
        })
}

// ============================================================================
// Factory functions for the backend features
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::mock_data::{seed_demo_data, DemoResolver};
    use crate::storage::InMemoryDirectory;

    impl AppState {
        /// Creates AppState with in-memory storage and cache seeded with demo
        /// technicians. Needs no external services unless a remote resolver
        /// is configured.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let directory = InMemoryDirectory::new();
            let cache: Arc<dyn AvailabilityCache> =
                Arc::new(MemoryCache::new(config.cache_max_entries));
            seed_demo_data(&directory, cache.as_ref()).await;

            let choice = select_resolver(config)?;
            let demo: Arc<dyn AvailabilityResolver> =
                Arc::new(DemoResolver::new(cache.clone(), directory.clone()));
            let resolver = build_resolver(&choice, config, Some(demo)).await?;

            Ok(Self::build(
                cache,
                resolver,
                Arc::new(directory),
                BackendInfo {
                    storage: "inmemory",
                    cache: "memory",
                    resolver: choice.name(),
                },
                config,
            ))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::cache::DynamoDbCache;
    use crate::storage::DynamoDbDirectory;

    impl AppState {
        /// Creates AppState with DynamoDB storage and cache tables.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let sdk_config = crate::aws::load_sdk_config(config).await;
            let client = aws_sdk_dynamodb::Client::new(&sdk_config);

            let cache = Arc::new(DynamoDbCache::new(
                client.clone(),
                config.cache_table_name.clone(),
            ));
            let directory = Arc::new(DynamoDbDirectory::new(
                client,
                config.jobs_table_suffix.clone(),
            ));

            let choice = select_resolver(config)?;
            let resolver = build_resolver(&choice, config, None).await?;

            Ok(Self::build(
                cache,
                resolver,
                directory,
                BackendInfo {
                    storage: "dynamodb",
                    cache: "dynamodb",
                    resolver: choice.name(),
                },
                config,
            ))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
impl AppState {
    /// Wraps a dispatcher built from test fakes.
    pub fn for_tests(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            backends: BackendInfo {
                storage: "fake",
                cache: "fake",
                resolver: "fake",
            },
            request_timeout: Duration::from_secs(5),
        }
    }
}
