//! Dispatch orchestration and per-company leases.

mod lease;
mod orchestrator;
#[cfg(test)]
pub(crate) mod test_support;

pub use orchestrator::{DispatchSettings, Dispatcher};
