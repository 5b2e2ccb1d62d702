//! Shared domain types for the Musicspace TakeOne integration.
//!
//! Everything here is free of I/O frameworks beyond `tokio::fs`, so the
//! API server, the repositories and the upload pipeline can all depend on it.

pub mod error;
pub mod hashing;
pub mod types;
pub mod video;
