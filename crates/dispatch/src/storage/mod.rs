//! Technician directory backends.
//!
//! Implementations of `locksmith_core::storage::TechnicianDirectory`, selected
//! at compile time:
//!
//! - `inmemory` (default): HashMap-backed directory seeded with demo data
//! - `dynamodb`: one `<company>LocksmithJobs` table per company
//!
//! ```bash
//! cargo build -p locksmith_dispatch --no-default-features --features dynamodb
//! ```

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p locksmith_dispatch --features dynamodb"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryDirectory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbDirectory;
