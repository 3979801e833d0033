//! Availability cache backends.
//!
//! Implementations of `locksmith_core::cache::AvailabilityCache`. The cache
//! backend follows the storage feature:
//!
//! - `inmemory` (default): LRU-bounded in-process cache
//! - `dynamodb`: the shared `NextAvailableCache` table written by the resolver

#[cfg(feature = "inmemory")]
pub mod memory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use memory::MemoryCache;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbCache;
