//! In-memory directory backend for development and tests.

mod repository;

pub use repository::InMemoryDirectory;
