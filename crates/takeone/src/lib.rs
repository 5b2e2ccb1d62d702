//! TakeOne REST client library.
//!
//! Two API families are wrapped here:
//!
//! - [`api`]: the partner API, authenticated with the static client id and
//!   secret, used by the web application to create app users, video
//!   containers and projects and to issue authorization codes.
//! - [`sdk`]: the app-user SDK API, authenticated with OAuth2 bearer tokens,
//!   used by the batch uploader to create segments, takes and production
//!   requests.
//!
//! [`webhook`] holds the inbound notification schema and [`upload`] the
//! presigned object-storage POST used for take parts.

pub mod api;
pub mod error;
pub mod models;
pub mod sdk;
pub mod upload;
pub mod webhook;

pub use api::{TakeOneApi, TakeOneConfig, TakeOneService};
pub use error::TakeOneApiError;
