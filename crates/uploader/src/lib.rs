//! `musicspace-uploader` library crate.
//!
//! Uploads pre-recorded takes to TakeOne on behalf of an app user, asks for
//! a production, waits for it to render and reviews the result. The binary
//! entrypoint lives in `main.rs`; modules are public for integration
//! testing.

pub mod config;
pub mod error;
pub mod parts;
pub mod pipeline;
pub mod poll;
pub mod probe;
pub mod segment;

pub use error::UploadError;
pub use pipeline::{UploadSummary, Uploader};
