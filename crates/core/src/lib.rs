//! Functional core for locksmith dispatch.
//!
//! Holds the domain types, the error taxonomy, request normalization and the
//! collaborator contracts the dispatch service is written against. Nothing in
//! this crate performs I/O.

pub mod cache;
pub mod dispatch;
pub mod resolver;
pub mod storage;
