mod error;
mod traits;
mod types;

pub use error::{ResolverError, Result};
pub use traits::AvailabilityResolver;
pub use types::{ResolveRequest, ResolverResponse};
